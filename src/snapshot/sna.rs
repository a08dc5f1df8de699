/*!
sna.rs - `.SNA` snapshot loader.

Fixed 27-byte header followed by 49152 bytes covering `0x4000..=0xFFFF`.
The format has no PC field: the convention is that the saved SP points
at a return address already pushed on the stack, so loading ends with
an implicit `RETN`-equivalent pop (spec §6, "RETN-after-load semantics").
*/

use super::SnapshotImage;
use crate::cpu::regs::{IntMode, Regs};
use crate::error::{EmuError, Result};

const HEADER_LEN: usize = 27;
const RAM_LEN: usize = 49152;
const TOTAL_LEN: usize = HEADER_LEN + RAM_LEN;

pub(super) fn load(data: &[u8]) -> Result<SnapshotImage> {
    if data.len() != TOTAL_LEN {
        return Err(EmuError::MalformedSna(format!(
            "expected {TOTAL_LEN} bytes, got {}",
            data.len()
        )));
    }

    let h = &data[..HEADER_LEN];
    let word = |lo: usize| u16::from_le_bytes([h[lo], h[lo + 1]]);

    let mut regs = Regs::new();
    regs.i = h[0];
    regs.set_hl_(word(1));
    regs.set_de_(word(3));
    regs.set_bc_(word(5));
    regs.set_af_(word(7));
    regs.set_hl(word(9));
    regs.set_de(word(11));
    regs.set_bc(word(13));
    regs.iy = word(15);
    regs.ix = word(17);
    let iff2 = (h[19] & 0x04) != 0;
    regs.iff1 = iff2;
    regs.iff2 = iff2;
    regs.r = h[20];
    regs.set_af(word(21));
    regs.sp = word(23);
    regs.im = match h[25] {
        1 => IntMode::Im1,
        2 => IntMode::Im2,
        _ => IntMode::Im0,
    };
    let border = h[26] & 0x07;

    let ram = data[HEADER_LEN..].to_vec();

    // RETN-equivalent: pop the return address the saved state left on
    // the stack, since .SNA has no PC field of its own.
    let sp_offset = regs.sp.wrapping_sub(0x4000) as usize;
    if sp_offset + 1 >= ram.len() {
        return Err(EmuError::MalformedSna("SP points outside the saved memory image".into()));
    }
    let pc = u16::from_le_bytes([ram[sp_offset], ram[sp_offset + 1]]);
    regs.sp = regs.sp.wrapping_add(2);
    regs.pc = pc;

    Ok(SnapshotImage { regs, ram, border })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_length() {
        let err = load(&[0u8; 10]);
        assert!(matches!(err, Err(EmuError::MalformedSna(_))));
    }

    #[test]
    fn loads_minimal_header_and_pops_pc() {
        let mut data = vec![0u8; TOTAL_LEN];
        // SP = 0x8000 -> offset 0x4000 into the RAM image; place a
        // return address of 0x1234 there.
        data[23] = 0x00;
        data[24] = 0x80;
        let offset = HEADER_LEN + (0x8000 - 0x4000);
        data[offset] = 0x34;
        data[offset + 1] = 0x12;

        let snap = load(&data).unwrap();
        assert_eq!(snap.regs.pc, 0x1234);
        assert_eq!(snap.regs.sp, 0x8002);
        assert_eq!(snap.ram.len(), RAM_LEN);
    }
}

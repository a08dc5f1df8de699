/*!
regfile.rs - Register-field decode helpers shared by the main, CB, and
indexed decode planes.

Implements the standard Z80 opcode decomposition `x=(op>>6)&3`,
`y=(op>>3)&7`, `z=op&7`, `p=y>>1`, `q=y&1`, plus the register/register-
pair lookup tables keyed by those fields. `IndexMode` tracks whether the
current instruction treats "HL" as the real HL, IX, or IY (spec §4.1's
DD/FD override).
*/

use crate::bus::Bus;
use crate::cpu::fetch::fetch_signed;
use crate::cpu::regs::{IndexMode, Regs};

#[inline]
pub(crate) fn decompose(op: u8) -> (u8, u8, u8, u8, u8) {
    let x = (op >> 6) & 3;
    let y = (op >> 3) & 7;
    let z = op & 7;
    (x, y, z, y >> 1, y & 1)
}

/// Resolve the effective address for the `(HL)`/`(IX+d)`/`(IY+d)` operand,
/// fetching and latching a displacement byte (and updating MEMPTR) when
/// an index register is active.
pub(crate) fn mem_addr(regs: &mut Regs, bus: &mut Bus, idx: IndexMode) -> u16 {
    match idx {
        IndexMode::Hl => regs.hl(),
        IndexMode::Ix => {
            let d = fetch_signed(regs, bus) as i32;
            let addr = (regs.ix as i32 + d) as u16;
            regs.memptr = addr;
            addr
        }
        IndexMode::Iy => {
            let d = fetch_signed(regs, bus) as i32;
            let addr = (regs.iy as i32 + d) as u16;
            regs.memptr = addr;
            addr
        }
    }
}

/// Resolve a memory address given an already-fetched displacement (used
/// by the DD-CB/FD-CB plane, which fetches `d` before the opcode byte).
pub(crate) fn mem_addr_with_disp(regs: &Regs, idx: IndexMode, d: i8) -> u16 {
    match idx {
        IndexMode::Hl => regs.hl(),
        IndexMode::Ix => (regs.ix as i32 + d as i32) as u16,
        IndexMode::Iy => (regs.iy as i32 + d as i32) as u16,
    }
}

/// Read r[code] for a single-register-field instruction (ALU ops,
/// INC/DEC r, CB ops on r). Code 4/5 substitute IXH/IXL or IYH/IYL when
/// `idx` is active; code 6 dereferences `(HL)`/`(IX+d)`/`(IY+d)`.
pub(crate) fn read_r8(regs: &mut Regs, bus: &mut Bus, code: u8, idx: IndexMode) -> u8 {
    match code {
        0 => regs.b,
        1 => regs.c,
        2 => regs.d,
        3 => regs.e,
        4 => match idx {
            IndexMode::Hl => regs.h,
            IndexMode::Ix => regs.ixh(),
            IndexMode::Iy => regs.iyh(),
        },
        5 => match idx {
            IndexMode::Hl => regs.l,
            IndexMode::Ix => regs.ixl(),
            IndexMode::Iy => regs.iyl(),
        },
        6 => {
            let addr = mem_addr(regs, bus, idx);
            bus.read(addr)
        }
        7 => regs.a,
        _ => unreachable!("3-bit register field"),
    }
}

pub(crate) fn write_r8(regs: &mut Regs, bus: &mut Bus, code: u8, idx: IndexMode, value: u8) {
    match code {
        0 => regs.b = value,
        1 => regs.c = value,
        2 => regs.d = value,
        3 => regs.e = value,
        4 => match idx {
            IndexMode::Hl => regs.h = value,
            IndexMode::Ix => regs.set_ixh(value),
            IndexMode::Iy => regs.set_iyh(value),
        },
        5 => match idx {
            IndexMode::Hl => regs.l = value,
            IndexMode::Ix => regs.set_ixl(value),
            IndexMode::Iy => regs.set_iyl(value),
        },
        6 => {
            let addr = mem_addr(regs, bus, idx);
            bus.write(addr, value);
        }
        7 => regs.a = value,
        _ => unreachable!("3-bit register field"),
    }
}

/// Read r[code] without ever substituting IXH/IXL/IYH/IYL - used for the
/// "other" operand of `LD r,r'` when the instruction's memory operand is
/// `(IX+d)`/`(IY+d)` (spec §4.3: that operand always names the real H/L).
pub(crate) fn read_real_r8(regs: &Regs, code: u8) -> u8 {
    match code {
        0 => regs.b,
        1 => regs.c,
        2 => regs.d,
        3 => regs.e,
        4 => regs.h,
        5 => regs.l,
        7 => regs.a,
        _ => unreachable!("register field 6 is not a plain register"),
    }
}

pub(crate) fn write_real_r8(regs: &mut Regs, code: u8, value: u8) {
    match code {
        0 => regs.b = value,
        1 => regs.c = value,
        2 => regs.d = value,
        3 => regs.e = value,
        4 => regs.h = value,
        5 => regs.l = value,
        7 => regs.a = value,
        _ => unreachable!("register field 6 is not a plain register"),
    }
}

/// rp[p]: BC, DE, HL(or IX/IY), SP.
pub(crate) fn get_rp(regs: &Regs, p: u8, idx: IndexMode) -> u16 {
    match p {
        0 => regs.bc(),
        1 => regs.de(),
        2 => match idx {
            IndexMode::Hl => regs.hl(),
            IndexMode::Ix => regs.ix,
            IndexMode::Iy => regs.iy,
        },
        3 => regs.sp,
        _ => unreachable!(),
    }
}

pub(crate) fn set_rp(regs: &mut Regs, p: u8, idx: IndexMode, value: u16) {
    match p {
        0 => regs.set_bc(value),
        1 => regs.set_de(value),
        2 => match idx {
            IndexMode::Hl => regs.set_hl(value),
            IndexMode::Ix => regs.ix = value,
            IndexMode::Iy => regs.iy = value,
        },
        3 => regs.sp = value,
        _ => unreachable!(),
    }
}

/// rp2[p]: BC, DE, HL(or IX/IY), AF - the PUSH/POP register-pair table.
pub(crate) fn get_rp2(regs: &Regs, p: u8, idx: IndexMode) -> u16 {
    match p {
        0 => regs.bc(),
        1 => regs.de(),
        2 => match idx {
            IndexMode::Hl => regs.hl(),
            IndexMode::Ix => regs.ix,
            IndexMode::Iy => regs.iy,
        },
        3 => regs.af(),
        _ => unreachable!(),
    }
}

pub(crate) fn set_rp2(regs: &mut Regs, p: u8, idx: IndexMode, value: u16) {
    match p {
        0 => regs.set_bc(value),
        1 => regs.set_de(value),
        2 => match idx {
            IndexMode::Hl => regs.set_hl(value),
            IndexMode::Ix => regs.ix = value,
            IndexMode::Iy => regs.iy = value,
        },
        3 => regs.set_af(value),
        _ => unreachable!(),
    }
}

/// cc[y]: NZ, Z, NC, C, PO, PE, P, M.
pub(crate) fn test_cc(regs: &Regs, y: u8) -> bool {
    use crate::cpu::regs::{FLAG_C, FLAG_PV, FLAG_S, FLAG_Z};
    match y {
        0 => !regs.flag(FLAG_Z),
        1 => regs.flag(FLAG_Z),
        2 => !regs.flag(FLAG_C),
        3 => regs.flag(FLAG_C),
        4 => !regs.flag(FLAG_PV),
        5 => regs.flag(FLAG_PV),
        6 => !regs.flag(FLAG_S),
        7 => regs.flag(FLAG_S),
        _ => unreachable!(),
    }
}

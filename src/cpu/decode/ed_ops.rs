/*!
ed_ops.rs - the ED-prefixed extended opcode plane.

Covers 16-bit ADC/SBC HL,rr; `LD (nn),rr`/`LD rr,(nn)`; block
move/compare/input/output groups (LDI/LDD/LDIR/LDDR, CPI/CPD/CPIR/CPDR,
INI/IND/INIR/INDR, OUTI/OUTD/OTIR/OTDR); `NEG`; `IM 0/1/2`; `LD A,I` /
`LD A,R` / `LD I,A` / `LD R,A`; `RRD`/`RLD`; `RETN`/`RETI`. Unassigned ED
opcodes are documented no-ops (`NOP` at 8T), per spec §4.6.
*/

use crate::bus::Bus;
use crate::cpu::alu;
use crate::cpu::decode::main_ops::pop16;
use crate::cpu::decode::regfile::{decompose, get_rp, read_real_r8, set_rp, write_real_r8};
use crate::cpu::fetch::fetch_word;
use crate::cpu::regs::{FLAG_3, FLAG_5, FLAG_H, FLAG_N, FLAG_PV, FLAG_S, FLAG_Z, IndexMode, IntMode, Regs, parity};
use crate::cpu::timing as t;

pub(crate) fn execute_ed(regs: &mut Regs, bus: &mut Bus, op: u8) -> u32 {
    let (x, y, z, p, q) = decompose(op);

    match (x, z) {
        (1, 0) => {
            // IN r[y],(C) ; IN (C) (y==6) sets flags but discards the value.
            let v = bus.in_port(regs.bc());
            set_in_flags(regs, v);
            if y != 6 {
                write_real_r8(regs, y, v);
            }
            t::ED_IO
        }
        (1, 1) => {
            // OUT (C),r[y] ; OUT (C),0 (y==6).
            let v = if y == 6 { 0 } else { read_real_r8(regs, y) };
            bus.out_port(regs.bc(), v);
            t::ED_IO
        }
        (1, 2) => {
            let hl = get_rp(regs, 2, IndexMode::Hl);
            let operand = get_rp(regs, p, IndexMode::Hl);
            let result = if q == 0 { alu::sbc16(regs, hl, operand) } else { alu::adc16(regs, hl, operand) };
            set_rp(regs, 2, IndexMode::Hl, result);
            t::ED_16_ALU
        }
        (1, 3) => {
            let nn = fetch_word(regs, bus);
            regs.memptr = nn.wrapping_add(1);
            if q == 0 {
                let v = get_rp(regs, p, IndexMode::Hl);
                bus.write_word(nn, v);
            } else {
                let v = bus.read_word(nn);
                set_rp(regs, p, IndexMode::Hl, v);
            }
            t::ED_16_MEM
        }
        (1, 4) => {
            let a = regs.a;
            regs.a = 0;
            alu::sub8(regs, a);
            t::ED_NEG
        }
        (1, 5) => {
            // RETN (y!=1 also maps to RETN per undocumented duplicates); RETI at y==1.
            regs.iff1 = regs.iff2;
            let addr = pop16(regs, bus);
            regs.pc = addr;
            regs.memptr = addr;
            if y == 1 { t::ED_RETI } else { t::RETN }
        }
        (1, 6) => {
            regs.im = match y & 3 {
                0 | 1 => IntMode::Im0,
                2 => IntMode::Im1,
                _ => IntMode::Im2,
            };
            t::ED_IM
        }
        (1, 7) => execute_ed_misc(regs, bus, y),
        (2, _) if (4..=7).contains(&y) && (0..=3).contains(&z) => execute_block(regs, bus, y, z),
        _ => t::ED_NOP,
    }
}

fn set_in_flags(regs: &mut Regs, v: u8) {
    regs.set_flag(FLAG_S, v & 0x80 != 0);
    regs.set_flag(FLAG_Z, v == 0);
    regs.set_flag(FLAG_H, false);
    regs.set_flag(FLAG_PV, parity(v));
    regs.set_flag(FLAG_N, false);
    regs.set_53_from(v);
}

fn execute_ed_misc(regs: &mut Regs, bus: &mut Bus, y: u8) -> u32 {
    match y {
        1 => {
            regs.r = regs.a;
            t::ED_IR
        }
        2 => {
            regs.i = regs.a;
            t::ED_IR
        }
        3 => {
            regs.a = regs.i;
            regs.set_flag(FLAG_S, regs.a & 0x80 != 0);
            regs.set_flag(FLAG_Z, regs.a == 0);
            regs.set_flag(FLAG_H, false);
            regs.set_flag(FLAG_N, false);
            regs.set_flag(FLAG_PV, regs.iff2);
            regs.set_53_from(regs.a);
            t::ED_IR
        }
        4 => {
            regs.a = regs.r;
            regs.set_flag(FLAG_S, regs.a & 0x80 != 0);
            regs.set_flag(FLAG_Z, regs.a == 0);
            regs.set_flag(FLAG_H, false);
            regs.set_flag(FLAG_N, false);
            regs.set_flag(FLAG_PV, regs.iff2);
            regs.set_53_from(regs.a);
            t::ED_IR
        }
        5 => {
            let hl = regs.hl();
            let m = bus.read(hl);
            let lo = m & 0x0F;
            let result = (m >> 4) | (regs.a << 4);
            regs.a = (regs.a & 0xF0) | lo;
            bus.write(hl, result);
            regs.memptr = hl.wrapping_add(1);
            finish_rotate_digit(regs);
            t::ED_RRD_RLD
        }
        6 => {
            let hl = regs.hl();
            let m = bus.read(hl);
            let hi = regs.a & 0x0F;
            let result = (m << 4) | hi;
            regs.a = (regs.a & 0xF0) | (m >> 4);
            bus.write(hl, result);
            regs.memptr = hl.wrapping_add(1);
            finish_rotate_digit(regs);
            t::ED_RRD_RLD
        }
        _ => t::ED_NOP,
    }
}

fn finish_rotate_digit(regs: &mut Regs) {
    regs.set_flag(FLAG_S, regs.a & 0x80 != 0);
    regs.set_flag(FLAG_Z, regs.a == 0);
    regs.set_flag(FLAG_H, false);
    regs.set_flag(FLAG_N, false);
    regs.set_flag(FLAG_PV, parity(regs.a));
    regs.set_53_from(regs.a);
}

/// The block group: z selects LD/CP/IN/OUT, y selects I/D/IR/DR
/// (increment vs decrement, single-shot vs repeating).
fn execute_block(regs: &mut Regs, bus: &mut Bus, y: u8, z: u8) -> u32 {
    let increment = y == 4 || y == 6;
    let repeat = y == 6 || y == 7;

    let cycles = match z {
        0 => block_ldx(regs, bus, increment),
        1 => block_cpx(regs, bus, increment),
        2 => block_inx(regs, bus, increment),
        3 => block_outx(regs, bus, increment),
        _ => return t::REG,
    };

    // CPIR/CPDR also stop early once a match is found (z==1 is the CP group).
    if repeat && regs.bc() != 0 && !(z == 1 && regs.flag(FLAG_Z)) {
        regs.pc = regs.pc.wrapping_sub(2);
        regs.memptr = regs.pc.wrapping_add(1);
        t::ED_BLOCK_REPEAT
    } else {
        cycles
    }
}

fn block_ldx(regs: &mut Regs, bus: &mut Bus, increment: bool) -> u32 {
    let (hl, de, bc) = (regs.hl(), regs.de(), regs.bc());
    let v = bus.read(hl);
    bus.write(de, v);
    let next = if increment { 1i32 } else { -1 };
    regs.set_hl((hl as i32 + next) as u16);
    regs.set_de((de as i32 + next) as u16);
    regs.set_bc(bc.wrapping_sub(1));

    regs.set_flag(FLAG_H, false);
    regs.set_flag(FLAG_N, false);
    regs.set_flag(FLAG_PV, regs.bc() != 0);
    let n = regs.a.wrapping_add(v);
    regs.set_flag(FLAG_5, n & 0x02 != 0);
    regs.set_flag(FLAG_3, n & 0x08 != 0);
    t::ED_BLOCK
}

fn block_cpx(regs: &mut Regs, bus: &mut Bus, increment: bool) -> u32 {
    let (hl, bc) = (regs.hl(), regs.bc());
    let v = bus.read(hl);
    let a = regs.a;
    let result = a.wrapping_sub(v);
    let half = (a & 0x0F) < (v & 0x0F);

    regs.set_flag(FLAG_S, result & 0x80 != 0);
    regs.set_flag(FLAG_Z, result == 0);
    regs.set_flag(FLAG_H, half);
    regs.set_flag(FLAG_N, true);

    let next = if increment { 1i32 } else { -1 };
    regs.set_hl((hl as i32 + next) as u16);
    regs.set_bc(bc.wrapping_sub(1));
    regs.set_flag(FLAG_PV, regs.bc() != 0);

    let n = result.wrapping_sub(half as u8);
    regs.set_flag(FLAG_5, n & 0x02 != 0);
    regs.set_flag(FLAG_3, n & 0x08 != 0);
    regs.memptr = if increment { regs.memptr.wrapping_add(1) } else { regs.memptr.wrapping_sub(1) };
    t::ED_BLOCK
}

fn block_inx(regs: &mut Regs, bus: &mut Bus, increment: bool) -> u32 {
    let hl = regs.hl();
    let v = bus.in_port(regs.bc());
    bus.write(hl, v);
    regs.b = regs.b.wrapping_sub(1);
    let next = if increment { 1i32 } else { -1 };
    regs.set_hl((hl as i32 + next) as u16);
    regs.memptr = if increment { regs.bc().wrapping_add(1) } else { regs.bc().wrapping_sub(1) };

    regs.set_flag(FLAG_Z, regs.b == 0);
    regs.set_flag(FLAG_N, v & 0x80 != 0);
    regs.set_53_from(regs.b);
    t::ED_BLOCK
}

fn block_outx(regs: &mut Regs, bus: &mut Bus, increment: bool) -> u32 {
    let hl = regs.hl();
    let v = bus.read(hl);
    // B is decremented *before* forming the port so the high byte of
    // the port written is B-1 (spec §4.6).
    regs.b = regs.b.wrapping_sub(1);
    bus.out_port(regs.bc(), v);
    let next = if increment { 1i32 } else { -1 };
    regs.set_hl((hl as i32 + next) as u16);
    regs.memptr = if increment { regs.bc().wrapping_add(1) } else { regs.bc().wrapping_sub(1) };

    regs.set_flag(FLAG_Z, regs.b == 0);
    regs.set_flag(FLAG_N, v & 0x80 != 0);
    regs.set_53_from(regs.b);
    t::ED_BLOCK
}

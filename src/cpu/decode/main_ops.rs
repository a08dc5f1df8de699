/*!
main_ops.rs - the unprefixed (and DD/FD-substituted) main opcode plane.

`execute_main` decodes a single main-table opcode byte already fetched
by the caller, using the standard `x/y/z/p/q` decomposition (spec §4.1).
It is called once for plain opcodes (`idx = IndexMode::Hl`) and again,
unmodified, for DD/FD-prefixed opcodes with `idx` set to `Ix`/`Iy` - the
substitution of HL for an index register happens entirely inside the
register/address helpers in `regfile.rs`, per spec §4.1/§4.3.

Returns the T-state cost of the executed instruction, already reflecting
`idx` (no further penalty should be applied by the caller for opcodes
resolved here - see `cpu::decode::prefixed` for how chained/redundant
prefix bytes are accounted separately).
*/

use crate::bus::Bus;
use crate::cpu::alu;
use crate::cpu::decode::alu_dispatch::apply_alu;
use crate::cpu::decode::regfile::*;
use crate::cpu::fetch::{fetch_byte, fetch_word};
use crate::cpu::regs::{FLAG_C, FLAG_H, FLAG_N, IndexMode, Regs};
use crate::cpu::timing as t;

pub(crate) fn execute_main(regs: &mut Regs, bus: &mut Bus, op: u8, idx: IndexMode) -> u32 {
    let (x, y, z, p, q) = decompose(op);
    let pen = if idx != IndexMode::Hl { t::PREFIX_PENALTY } else { 0 };

    match (x, z) {
        (0, 0) => match y {
            0 => t::REG, // NOP
            1 => {
                // EX AF,AF'
                let af = regs.af();
                regs.set_af(regs.af_());
                regs.set_af_(af);
                t::REG
            }
            2 => {
                // DJNZ d
                let d = fetch_byte(regs, bus) as i8;
                regs.b = regs.b.wrapping_sub(1);
                if regs.b != 0 {
                    regs.pc = (regs.pc as i32 + d as i32) as u16;
                    regs.memptr = regs.pc;
                    t::DJNZ_TAKEN
                } else {
                    t::DJNZ_NOT_TAKEN
                }
            }
            3 => {
                // JR d
                let d = fetch_byte(regs, bus) as i8;
                regs.pc = (regs.pc as i32 + d as i32) as u16;
                regs.memptr = regs.pc;
                t::JR_TAKEN
            }
            4..=7 => {
                // JR cc,d (cc indices 0..3)
                let d = fetch_byte(regs, bus) as i8;
                if test_cc(regs, y - 4) {
                    regs.pc = (regs.pc as i32 + d as i32) as u16;
                    regs.memptr = regs.pc;
                    t::JR_TAKEN
                } else {
                    t::JR_NOT_TAKEN
                }
            }
            _ => unreachable!(),
        },
        (0, 1) => {
            if q == 0 {
                let nn = fetch_word(regs, bus);
                set_rp(regs, p, idx, nn);
                t::IMM16 + pen
            } else {
                let operand = get_rp(regs, p, idx);
                let dest = get_rp(regs, 2, idx);
                let result = alu::add16(regs, dest, operand);
                set_rp(regs, 2, idx, result);
                t::ADD_HL_RR + pen
            }
        }
        (0, 2) => match (q, p) {
            (0, 0) => {
                let addr = regs.bc();
                bus.write(addr, regs.a);
                regs.memptr = (addr.wrapping_add(1) & 0x00FF) | ((regs.a as u16) << 8);
                t::HL_MEM
            }
            (0, 1) => {
                let addr = regs.de();
                bus.write(addr, regs.a);
                regs.memptr = (addr.wrapping_add(1) & 0x00FF) | ((regs.a as u16) << 8);
                t::HL_MEM
            }
            (0, 2) => {
                let nn = fetch_word(regs, bus);
                let v = get_rp(regs, 2, idx);
                bus.write_word(nn, v);
                regs.memptr = nn.wrapping_add(1);
                t::LD_NN_HL + pen
            }
            (0, 3) => {
                let nn = fetch_word(regs, bus);
                bus.write(nn, regs.a);
                regs.memptr = (nn.wrapping_add(1) & 0x00FF) | ((regs.a as u16) << 8);
                t::LD_NN_A
            }
            (1, 0) => {
                let addr = regs.bc();
                regs.a = bus.read(addr);
                regs.memptr = addr.wrapping_add(1);
                t::HL_MEM
            }
            (1, 1) => {
                let addr = regs.de();
                regs.a = bus.read(addr);
                regs.memptr = addr.wrapping_add(1);
                t::HL_MEM
            }
            (1, 2) => {
                let nn = fetch_word(regs, bus);
                let v = bus.read_word(nn);
                set_rp(regs, 2, idx, v);
                regs.memptr = nn.wrapping_add(1);
                t::LD_NN_HL + pen
            }
            (1, 3) => {
                let nn = fetch_word(regs, bus);
                regs.a = bus.read(nn);
                regs.memptr = nn.wrapping_add(1);
                t::LD_NN_A
            }
            _ => unreachable!(),
        },
        (0, 3) => {
            let cur = get_rp(regs, p, idx);
            let next = if q == 0 { cur.wrapping_add(1) } else { cur.wrapping_sub(1) };
            set_rp(regs, p, idx, next);
            t::INC_DEC_RR + pen
        }
        (0, 4) => {
            let mem = y == 6;
            let v = read_r8(regs, bus, y, idx);
            let result = alu::inc8(regs, v);
            write_r8(regs, bus, y, idx, result);
            cost_rmw(mem, idx)
        }
        (0, 5) => {
            let mem = y == 6;
            let v = read_r8(regs, bus, y, idx);
            let result = alu::dec8(regs, v);
            write_r8(regs, bus, y, idx, result);
            cost_rmw(mem, idx)
        }
        (0, 6) => {
            let mem = y == 6;
            let n = fetch_byte(regs, bus);
            write_r8(regs, bus, y, idx, n);
            if mem {
                if idx == IndexMode::Hl { t::LD_HL_N } else { t::IDX_LD_N }
            } else {
                t::IMM8 + pen
            }
        }
        (0, 7) => {
            match y {
                0 => {
                    let c = regs.a & 0x80 != 0;
                    regs.a = regs.a.rotate_left(1);
                    regs.set_flag(FLAG_C, c);
                    regs.set_flag(FLAG_H, false);
                    regs.set_flag(FLAG_N, false);
                    regs.set_53_from(regs.a);
                }
                1 => {
                    let c = regs.a & 0x01 != 0;
                    regs.a = regs.a.rotate_right(1);
                    regs.set_flag(FLAG_C, c);
                    regs.set_flag(FLAG_H, false);
                    regs.set_flag(FLAG_N, false);
                    regs.set_53_from(regs.a);
                }
                2 => {
                    let old_c = regs.flag(FLAG_C) as u8;
                    let c = regs.a & 0x80 != 0;
                    regs.a = (regs.a << 1) | old_c;
                    regs.set_flag(FLAG_C, c);
                    regs.set_flag(FLAG_H, false);
                    regs.set_flag(FLAG_N, false);
                    regs.set_53_from(regs.a);
                }
                3 => {
                    let old_c = regs.flag(FLAG_C) as u8;
                    let c = regs.a & 0x01 != 0;
                    regs.a = (regs.a >> 1) | (old_c << 7);
                    regs.set_flag(FLAG_C, c);
                    regs.set_flag(FLAG_H, false);
                    regs.set_flag(FLAG_N, false);
                    regs.set_53_from(regs.a);
                }
                4 => alu::daa(regs),
                5 => alu::cpl(regs),
                6 => alu::scf(regs),
                7 => alu::ccf(regs),
                _ => unreachable!(),
            }
            t::REG + pen
        }
        (1, _) => {
            if z == 6 && y == 6 {
                regs.halted = true;
                regs.pc = regs.pc.wrapping_sub(1);
                return t::REG;
            }
            // LD r,r': when one side is the (HL)/(IX+d)/(IY+d) operand, the
            // OTHER side always names the real H/L, never IXH/IXL (spec §4.3).
            if z == 6 {
                let addr = mem_addr(regs, bus, idx);
                let v = read_real_r8(regs, y);
                bus.write(addr, v);
                return if idx == IndexMode::Hl { t::HL_MEM } else { t::IDX_MEM_8 };
            }
            if y == 6 {
                let addr = mem_addr(regs, bus, idx);
                let v = bus.read(addr);
                write_real_r8(regs, z, v);
                return if idx == IndexMode::Hl { t::HL_MEM } else { t::IDX_MEM_8 };
            }
            let v = read_r8(regs, bus, z, idx);
            write_r8(regs, bus, y, idx, v);
            t::REG + pen
        }
        (2, _) => {
            let mem = z == 6;
            let operand = read_r8(regs, bus, z, idx);
            apply_alu(regs, y, operand);
            cost_read(mem, idx)
        }
        (3, 0) => {
            if test_cc(regs, y) {
                let addr = pop16(regs, bus);
                regs.pc = addr;
                regs.memptr = addr;
                t::RET_CC_TAKEN
            } else {
                t::RET_CC_NOT_TAKEN
            }
        }
        (3, 1) => {
            if q == 0 {
                let v = pop16(regs, bus);
                set_rp2(regs, p, idx, v);
                t::POP + pen
            } else {
                match p {
                    0 => {
                        let addr = pop16(regs, bus);
                        regs.pc = addr;
                        regs.memptr = addr;
                        t::RET
                    }
                    1 => {
                        // EXX
                        let (bc, de, hl) = (regs.bc(), regs.de(), regs.hl());
                        regs.set_bc(regs.bc_());
                        regs.set_de(regs.de_());
                        regs.set_hl(regs.hl_());
                        regs.set_bc_(bc);
                        regs.set_de_(de);
                        regs.set_hl_(hl);
                        t::REG
                    }
                    2 => {
                        regs.pc = get_rp(regs, 2, idx);
                        t::REG + pen
                    }
                    3 => {
                        regs.sp = get_rp(regs, 2, idx);
                        t::REG + pen
                    }
                    _ => unreachable!(),
                }
            }
        }
        (3, 2) => {
            let nn = fetch_word(regs, bus);
            regs.memptr = nn;
            if test_cc(regs, y) {
                regs.pc = nn;
            }
            t::JP
        }
        (3, 3) => match y {
            0 => {
                let nn = fetch_word(regs, bus);
                regs.memptr = nn;
                regs.pc = nn;
                t::JP
            }
            1 => unreachable!("CB prefix is intercepted before execute_main"),
            2 => {
                let n = fetch_byte(regs, bus);
                let port = ((regs.a as u16) << 8) | n as u16;
                bus.out_port(port, regs.a);
                regs.memptr = (regs.a as u16) << 8 | n.wrapping_add(1) as u16;
                t::ED_IO_IMM
            }
            3 => {
                let n = fetch_byte(regs, bus);
                let port = ((regs.a as u16) << 8) | n as u16;
                regs.a = bus.in_port(port);
                regs.memptr = port.wrapping_add(1);
                t::ED_IO_IMM
            }
            4 => {
                let sp = regs.sp;
                let lo = bus.read(sp);
                let hi = bus.read(sp.wrapping_add(1));
                let v = get_rp(regs, 2, idx);
                bus.write(sp, v as u8);
                bus.write(sp.wrapping_add(1), (v >> 8) as u8);
                let nv = ((hi as u16) << 8) | lo as u16;
                set_rp(regs, 2, idx, nv);
                regs.memptr = nv;
                if idx == IndexMode::Hl { t::EX_SP_HL } else { t::IDX_EX_SP }
            }
            5 => {
                let (de, hl) = (regs.de(), regs.hl());
                regs.set_de(hl);
                regs.set_hl(de);
                t::REG
            }
            6 => {
                regs.iff1 = false;
                regs.iff2 = false;
                t::REG
            }
            7 => {
                regs.iff1 = true;
                regs.iff2 = true;
                regs.ei_shadow = true;
                t::REG
            }
            _ => unreachable!(),
        },
        (3, 4) => {
            let nn = fetch_word(regs, bus);
            regs.memptr = nn;
            if test_cc(regs, y) {
                push16(regs, bus, regs.pc);
                regs.pc = nn;
                t::CALL_TAKEN
            } else {
                t::CALL_NOT_TAKEN
            }
        }
        (3, 5) => {
            if q == 0 {
                let v = get_rp2(regs, p, idx);
                push16(regs, bus, v);
                t::PUSH + pen
            } else {
                match p {
                    0 => {
                        let nn = fetch_word(regs, bus);
                        regs.memptr = nn;
                        push16(regs, bus, regs.pc);
                        regs.pc = nn;
                        t::CALL_TAKEN
                    }
                    _ => unreachable!("DD/ED/FD prefixes are intercepted before execute_main"),
                }
            }
        }
        (3, 6) => {
            let n = fetch_byte(regs, bus);
            apply_alu(regs, y, n);
            t::IMM8 + pen
        }
        (3, 7) => {
            push16(regs, bus, regs.pc);
            regs.pc = (y as u16) * 8;
            regs.memptr = regs.pc;
            t::RST
        }
        _ => unreachable!("x in 0..=3"),
    }
}

fn cost_rmw(mem: bool, idx: IndexMode) -> u32 {
    if !mem {
        t::REG + if idx != IndexMode::Hl { t::PREFIX_PENALTY } else { 0 }
    } else if idx == IndexMode::Hl {
        t::REG_RMW_HL
    } else {
        t::IDX_INC_DEC
    }
}

fn cost_read(mem: bool, idx: IndexMode) -> u32 {
    if !mem {
        t::REG + if idx != IndexMode::Hl { t::PREFIX_PENALTY } else { 0 }
    } else if idx == IndexMode::Hl {
        t::HL_MEM
    } else {
        t::IDX_MEM_8
    }
}

pub(crate) fn pop16(regs: &mut Regs, bus: &mut Bus) -> u16 {
    let v = bus.read_word(regs.sp);
    regs.sp = regs.sp.wrapping_add(2);
    v
}

pub(crate) fn push16(regs: &mut Regs, bus: &mut Bus, value: u16) {
    regs.sp = regs.sp.wrapping_sub(2);
    bus.write_word(regs.sp, value);
}

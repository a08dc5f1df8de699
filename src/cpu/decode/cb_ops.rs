/*!
cb_ops.rs - the CB-prefixed rotate/shift/BIT/SET/RES plane.

`execute_cb` handles both the plain `CB op` form (`idx = Hl`, address
resolved from `op`'s own register field) and the `DD CB d op` / `FD CB d
op` form, where the displacement has already been fetched by the caller
and the target address is passed in directly via `addr_override`. In the
indexed form, a `z != 6` register field still names a *copy-back*
register (spec §4.4: the undocumented DDCB/FDCB forms write the result
to both the `(IX+d)`/`(IY+d)` cell and the named register).
*/

use crate::bus::Bus;
use crate::cpu::alu;
use crate::cpu::decode::regfile::{decompose, read_real_r8, write_real_r8};
use crate::cpu::regs::{IndexMode, Regs};
use crate::cpu::timing as t;

pub(crate) fn execute_cb(
    regs: &mut Regs,
    bus: &mut Bus,
    op: u8,
    idx: IndexMode,
    addr_override: Option<u16>,
) -> u32 {
    let (x, y, z, _, _) = decompose(op);
    let indexed = addr_override.is_some();

    let value = if let Some(a) = addr_override {
        bus.read(a)
    } else if z == 6 {
        let hl = regs.hl();
        regs.memptr = hl.wrapping_add(1);
        bus.read(hl)
    } else {
        read_real_r8(regs, z)
    };

    let result = match x {
        0 => match y {
            0 => alu::rlc(regs, value),
            1 => alu::rrc(regs, value),
            2 => alu::rl(regs, value),
            3 => alu::rr(regs, value),
            4 => alu::sla(regs, value),
            5 => alu::sra(regs, value),
            6 => alu::sll(regs, value),
            7 => alu::srl(regs, value),
            _ => unreachable!(),
        },
        1 => {
            let memptr_high = if indexed || z == 6 { Some((regs.memptr >> 8) as u8) } else { None };
            alu::bit_test(regs, y, value, memptr_high);
            value
        }
        2 => value & !(1 << y),
        3 => value | (1 << y),
        _ => unreachable!(),
    };

    if x == 1 {
        // BIT never writes back.
        return cost(x, z, indexed);
    }

    if let Some(a) = addr_override {
        bus.write(a, result);
        if z != 6 {
            write_real_r8(regs, z, result);
        }
    } else if z == 6 {
        bus.write(regs.hl(), result);
    } else {
        write_real_r8(regs, z, result);
    }

    cost(x, z, indexed)
}

fn cost(x: u8, z: u8, indexed: bool) -> u32 {
    if indexed {
        if x == 1 { t::DDCB_BIT } else { t::DDCB_RMW }
    } else if z == 6 {
        if x == 1 { t::BIT_HL } else { t::CB_HL }
    } else if x == 1 {
        t::BIT_REG
    } else {
        t::CB_REG
    }
}

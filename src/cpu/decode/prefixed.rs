/*!
prefixed.rs - DD/FD prefix chaining and the DD-CB/FD-CB displaced-bit-op
wrapper (spec §4.1, §4.4).

Real hardware treats a run of DD/FD bytes as "last prefix wins", each
contributing its own 4T fetch; `decode_indexed` models that by looping
over prefix bytes before finally resolving the underlying main-table
opcode (or the DD-CB/FD-CB special case) with the final `IndexMode`.
*/

use crate::bus::Bus;
use crate::cpu::decode::cb_ops::execute_cb;
use crate::cpu::decode::main_ops::execute_main;
use crate::cpu::decode::regfile::mem_addr_with_disp;
use crate::cpu::fetch::{fetch_byte, fetch_signed};
use crate::cpu::regs::{IndexMode, Regs};
use crate::cpu::timing as t;

pub(crate) fn decode_indexed(regs: &mut Regs, bus: &mut Bus, first_prefix: u8) -> u32 {
    let mut idx = if first_prefix == 0xDD { IndexMode::Ix } else { IndexMode::Iy };
    let mut extra = 0u32;

    loop {
        let op2 = fetch_byte(regs, bus);
        regs.bump_r();
        match op2 {
            0xDD => {
                idx = IndexMode::Ix;
                extra += t::PREFIX_PENALTY;
            }
            0xFD => {
                idx = IndexMode::Iy;
                extra += t::PREFIX_PENALTY;
            }
            0xCB => {
                let d = fetch_signed(regs, bus);
                let op3 = fetch_byte(regs, bus);
                let addr = mem_addr_with_disp(regs, idx, d);
                regs.memptr = addr;
                return execute_cb(regs, bus, op3, idx, Some(addr)) + extra;
            }
            _ => return execute_main(regs, bus, op2, idx) + extra,
        }
    }
}

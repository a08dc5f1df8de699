//! Instruction decode: the top-level opcode dispatch and its four
//! sub-planes (main, CB, ED, DD/FD + DD-CB/FD-CB).

pub(crate) mod alu_dispatch;
pub(crate) mod cb_ops;
pub(crate) mod ed_ops;
pub(crate) mod main_ops;
pub(crate) mod prefixed;
pub(crate) mod regfile;

#[cfg(test)]
mod tests;

use crate::bus::Bus;
use crate::cpu::fetch::fetch_byte;
use crate::cpu::regs::{IndexMode, Regs};

/// Fetch and fully execute one instruction (including any DD/FD/CB/ED
/// prefix bytes), returning its T-state cost.
pub(crate) fn step_one(regs: &mut Regs, bus: &mut Bus) -> u32 {
    let op = fetch_byte(regs, bus);
    regs.bump_r();

    match op {
        0xCB => {
            let op2 = fetch_byte(regs, bus);
            regs.bump_r();
            cb_ops::execute_cb(regs, bus, op2, IndexMode::Hl, None)
        }
        0xED => {
            let op2 = fetch_byte(regs, bus);
            regs.bump_r();
            ed_ops::execute_ed(regs, bus, op2)
        }
        0xDD | 0xFD => prefixed::decode_indexed(regs, bus, op),
        _ => main_ops::execute_main(regs, bus, op, IndexMode::Hl),
    }
}

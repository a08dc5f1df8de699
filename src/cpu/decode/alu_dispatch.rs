//! ALU[y] operand dispatch shared by the main `x=2` plane and the `ALU n`
//! immediate forms.

use crate::cpu::alu;
use crate::cpu::regs::Regs;

pub(crate) fn apply_alu(regs: &mut Regs, y: u8, operand: u8) {
    match y {
        0 => {
            alu::add8(regs, operand);
        }
        1 => {
            alu::adc8(regs, operand);
        }
        2 => {
            alu::sub8(regs, operand);
        }
        3 => {
            alu::sbc8(regs, operand);
        }
        4 => {
            alu::and8(regs, operand);
        }
        5 => {
            alu::xor8(regs, operand);
        }
        6 => {
            alu::or8(regs, operand);
        }
        7 => {
            alu::cp8(regs, operand);
        }
        _ => unreachable!("3-bit ALU selector"),
    }
}

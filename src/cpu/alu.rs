/*!
alu.rs - Z80 flag-setting arithmetic/logical core.

Centralizes the shared 8-bit and 16-bit ALU cores so every dispatch
plane (main, CB, ED, DD/FD, DD-CB/FD-CB) that needs ADD/ADC/SUB/SBC/CP,
AND/OR/XOR, INC/DEC, rotates/shifts, or BIT goes through one
implementation of the flag rules in spec §4.2/§4.5.
*/

use super::regs::{
    FLAG_3, FLAG_5, FLAG_C, FLAG_H, FLAG_N, FLAG_PV, FLAG_S, FLAG_Z, Regs, parity,
};

/// Shared 8-bit add/sub core. `store_result` controls whether the result
/// is written back into A (false for CP) and whether the 53-bits come
/// from the result (true) or the raw operand (false, per CP's rule).
fn alu8(regs: &mut Regs, operand: u8, carry_in: bool, sub: bool, store_result: bool) -> u8 {
    let a = regs.a;
    let cin = carry_in as i32;
    let full = if sub {
        a as i32 - operand as i32 - cin
    } else {
        a as i32 + operand as i32 + cin
    };
    let result = (full & 0xFF) as u8;
    let carry = if sub { full < 0 } else { full > 0xFF };
    let half = ((a ^ operand ^ result) & 0x10) != 0;
    let overflow = if sub {
        ((a ^ operand) & (a ^ result) & 0x80) != 0
    } else {
        ((a ^ result) & (operand ^ result) & 0x80) != 0
    };

    regs.set_flag(FLAG_C, carry);
    regs.set_flag(FLAG_H, half);
    regs.set_flag(FLAG_PV, overflow);
    regs.set_flag(FLAG_N, sub);
    regs.set_flag(FLAG_Z, result == 0);
    regs.set_flag(FLAG_S, (result & 0x80) != 0);
    regs.set_53_from(if store_result { result } else { operand });

    if store_result {
        regs.a = result;
    }
    result
}

pub fn add8(regs: &mut Regs, operand: u8) -> u8 {
    alu8(regs, operand, false, false, true)
}
pub fn adc8(regs: &mut Regs, operand: u8) -> u8 {
    let c = regs.flag(FLAG_C);
    alu8(regs, operand, c, false, true)
}
pub fn sub8(regs: &mut Regs, operand: u8) -> u8 {
    alu8(regs, operand, false, true, true)
}
pub fn sbc8(regs: &mut Regs, operand: u8) -> u8 {
    let c = regs.flag(FLAG_C);
    alu8(regs, operand, c, true, true)
}
pub fn cp8(regs: &mut Regs, operand: u8) {
    alu8(regs, operand, false, true, false);
}

pub fn and8(regs: &mut Regs, operand: u8) -> u8 {
    let result = regs.a & operand;
    regs.a = result;
    regs.set_flag(FLAG_H, true);
    regs.set_flag(FLAG_C, false);
    regs.set_flag(FLAG_N, false);
    regs.set_flag(FLAG_PV, parity(result));
    regs.set_flag(FLAG_Z, result == 0);
    regs.set_flag(FLAG_S, (result & 0x80) != 0);
    regs.set_53_from(result);
    result
}

pub fn or8(regs: &mut Regs, operand: u8) -> u8 {
    let result = regs.a | operand;
    regs.a = result;
    regs.set_flag(FLAG_H, false);
    regs.set_flag(FLAG_C, false);
    regs.set_flag(FLAG_N, false);
    regs.set_flag(FLAG_PV, parity(result));
    regs.set_flag(FLAG_Z, result == 0);
    regs.set_flag(FLAG_S, (result & 0x80) != 0);
    regs.set_53_from(result);
    result
}

pub fn xor8(regs: &mut Regs, operand: u8) -> u8 {
    let result = regs.a ^ operand;
    regs.a = result;
    regs.set_flag(FLAG_H, false);
    regs.set_flag(FLAG_C, false);
    regs.set_flag(FLAG_N, false);
    regs.set_flag(FLAG_PV, parity(result));
    regs.set_flag(FLAG_Z, result == 0);
    regs.set_flag(FLAG_S, (result & 0x80) != 0);
    regs.set_53_from(result);
    result
}

/// INC r: carry unchanged, N=0, H on low-nibble wrap, P/V on 0x7F->0x80.
pub fn inc8(regs: &mut Regs, v: u8) -> u8 {
    let result = v.wrapping_add(1);
    regs.set_flag(FLAG_H, (v & 0x0F) == 0x0F);
    regs.set_flag(FLAG_PV, v == 0x7F);
    regs.set_flag(FLAG_N, false);
    regs.set_flag(FLAG_Z, result == 0);
    regs.set_flag(FLAG_S, (result & 0x80) != 0);
    regs.set_53_from(result);
    result
}

/// DEC r: carry unchanged, N=1, H on low-nibble borrow, P/V on 0x80->0x7F.
pub fn dec8(regs: &mut Regs, v: u8) -> u8 {
    let result = v.wrapping_sub(1);
    regs.set_flag(FLAG_H, (v & 0x0F) == 0x00);
    regs.set_flag(FLAG_PV, v == 0x80);
    regs.set_flag(FLAG_N, true);
    regs.set_flag(FLAG_Z, result == 0);
    regs.set_flag(FLAG_S, (result & 0x80) != 0);
    regs.set_53_from(result);
    result
}

pub fn cpl(regs: &mut Regs) {
    regs.a = !regs.a;
    regs.set_flag(FLAG_H, true);
    regs.set_flag(FLAG_N, true);
    regs.set_53_from(regs.a);
}

pub fn scf(regs: &mut Regs) {
    let old_f = regs.f;
    regs.set_flag(FLAG_C, true);
    regs.set_flag(FLAG_H, false);
    regs.set_flag(FLAG_N, false);
    regs.set_53_from(regs.a | old_f);
}

pub fn ccf(regs: &mut Regs) {
    let old_f = regs.f;
    let old_c = regs.flag(FLAG_C);
    regs.set_flag(FLAG_H, old_c);
    regs.set_flag(FLAG_C, !old_c);
    regs.set_flag(FLAG_N, false);
    regs.set_53_from(regs.a | old_f);
}

/// DAA, following the classify-then-correct algorithm in spec §4.2.
pub fn daa(regs: &mut Regs) {
    let mut t: u8 = 0;
    let half = regs.flag(FLAG_H);
    let n = regs.flag(FLAG_N);

    if half || (regs.a & 0x0F) > 9 {
        t += 1;
    }
    if regs.flag(FLAG_C) || regs.a > 0x99 {
        t += 2;
        regs.set_flag(FLAG_C, true);
    }

    if n && !half {
        regs.set_flag(FLAG_H, false);
    } else if n && half {
        regs.set_flag(FLAG_H, (regs.a & 0x0F) < 6);
    } else {
        regs.set_flag(FLAG_H, (regs.a & 0x0F) >= 0x0A);
    }

    match t {
        1 => regs.a = regs.a.wrapping_add(if n { 0xFA } else { 0x06 }),
        2 => regs.a = regs.a.wrapping_add(if n { 0xA0 } else { 0x60 }),
        3 => regs.a = regs.a.wrapping_add(if n { 0x9A } else { 0x66 }),
        _ => {}
    }

    regs.set_flag(FLAG_S, (regs.a & 0x80) != 0);
    regs.set_flag(FLAG_Z, regs.a == 0);
    regs.set_flag(FLAG_PV, parity(regs.a));
    regs.set_53_from(regs.a);
}

// --- 16-bit arithmetic ------------------------------------------------

/// ADD HL,rr: does not touch Z or S.
pub fn add16(regs: &mut Regs, a: u16, b: u16) -> u16 {
    let full = a as u32 + b as u32;
    let result = full as u16;
    let half = ((a ^ b ^ result) & 0x1000) != 0;
    regs.set_flag(FLAG_C, full & 0x1_0000 != 0);
    regs.set_flag(FLAG_H, half);
    regs.set_flag(FLAG_N, false);
    regs.set_53_from((result >> 8) as u8);
    result
}

/// ADC HL,rr: touches Z and S in addition to the ADD HL,rr rules.
pub fn adc16(regs: &mut Regs, a: u16, b: u16) -> u16 {
    let cin = regs.flag(FLAG_C) as u32;
    let full = a as u32 + b as u32 + cin;
    let result = full as u16;
    let half = ((a ^ b ^ result) & 0x1000) != 0;
    let overflow = ((a ^ result) & (b ^ result) & 0x8000) != 0;
    regs.set_flag(FLAG_C, full & 0x1_0000 != 0);
    regs.set_flag(FLAG_H, half);
    regs.set_flag(FLAG_PV, overflow);
    regs.set_flag(FLAG_N, false);
    regs.set_flag(FLAG_Z, result == 0);
    regs.set_flag(FLAG_S, (result & 0x8000) != 0);
    regs.set_53_from((result >> 8) as u8);
    result
}

/// SBC HL,rr.
pub fn sbc16(regs: &mut Regs, a: u16, b: u16) -> u16 {
    let cin = regs.flag(FLAG_C) as i32;
    let full = a as i32 - b as i32 - cin;
    let result = (full & 0xFFFF) as u16;
    let half = ((a ^ b ^ result) & 0x1000) != 0;
    let overflow = ((a ^ b) & (a ^ result) & 0x8000) != 0;
    regs.set_flag(FLAG_C, full < 0);
    regs.set_flag(FLAG_H, half);
    regs.set_flag(FLAG_PV, overflow);
    regs.set_flag(FLAG_N, true);
    regs.set_flag(FLAG_Z, result == 0);
    regs.set_flag(FLAG_S, (result & 0x8000) != 0);
    regs.set_53_from((result >> 8) as u8);
    result
}

// --- rotates / shifts ---------------------------------------------------

fn shift_flags(regs: &mut Regs, result: u8, carry: bool) {
    regs.set_flag(FLAG_C, carry);
    regs.set_flag(FLAG_H, false);
    regs.set_flag(FLAG_N, false);
    regs.set_flag(FLAG_PV, parity(result));
    regs.set_flag(FLAG_Z, result == 0);
    regs.set_flag(FLAG_S, (result & 0x80) != 0);
    regs.set_53_from(result);
}

pub fn rlc(regs: &mut Regs, v: u8) -> u8 {
    let carry = (v & 0x80) != 0;
    let result = (v << 1) | (carry as u8);
    shift_flags(regs, result, carry);
    result
}
pub fn rrc(regs: &mut Regs, v: u8) -> u8 {
    let carry = (v & 0x01) != 0;
    let result = (v >> 1) | ((carry as u8) << 7);
    shift_flags(regs, result, carry);
    result
}
pub fn rl(regs: &mut Regs, v: u8) -> u8 {
    let old_c = regs.flag(FLAG_C) as u8;
    let carry = (v & 0x80) != 0;
    let result = (v << 1) | old_c;
    shift_flags(regs, result, carry);
    result
}
pub fn rr(regs: &mut Regs, v: u8) -> u8 {
    let old_c = regs.flag(FLAG_C) as u8;
    let carry = (v & 0x01) != 0;
    let result = (v >> 1) | (old_c << 7);
    shift_flags(regs, result, carry);
    result
}
pub fn sla(regs: &mut Regs, v: u8) -> u8 {
    let carry = (v & 0x80) != 0;
    let result = v << 1;
    shift_flags(regs, result, carry);
    result
}
pub fn sra(regs: &mut Regs, v: u8) -> u8 {
    let carry = (v & 0x01) != 0;
    let result = (v >> 1) | (v & 0x80);
    shift_flags(regs, result, carry);
    result
}
/// SLL (undocumented): shift left, feeding a 1 into bit 0.
pub fn sll(regs: &mut Regs, v: u8) -> u8 {
    let carry = (v & 0x80) != 0;
    let result = (v << 1) | 1;
    shift_flags(regs, result, carry);
    result
}
pub fn srl(regs: &mut Regs, v: u8) -> u8 {
    let carry = (v & 0x01) != 0;
    let result = v >> 1;
    shift_flags(regs, result, carry);
    result
}

/// BIT n,operand. `memptr_high` is `Some(WZ>>8)` for the `(HL)`/`(IX+d)`/
/// `(IY+d)` forms, whose 53-bits leak from MEMPTR rather than the tested
/// byte (spec §4.5).
pub fn bit_test(regs: &mut Regs, n: u8, value: u8, memptr_high: Option<u8>) {
    let set = (value >> n) & 1 != 0;
    regs.set_flag(FLAG_Z, !set);
    regs.set_flag(FLAG_PV, !set);
    regs.set_flag(FLAG_H, true);
    regs.set_flag(FLAG_N, false);
    regs.set_flag(FLAG_S, n == 7 && set);
    let src = memptr_high.unwrap_or(value);
    regs.set_53_from(src);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::regs::Regs;

    #[test]
    fn add_a_a_example() {
        // spec scenario 1: A=0x15,F=0 ; ADD A,A -> A=0x2A, F=0x28
        let mut r = Regs::new();
        r.a = 0x15;
        r.f = 0x00;
        add8(&mut r, 0x15);
        assert_eq!(r.a, 0x2A);
        assert_eq!(r.f, 0x28);
    }

    #[test]
    fn add_a_ff_example() {
        // spec scenario 2: A=0x3C,F=0 ; ADD A,0xFF -> A=0x3B, C=1,H=1,N=0,PV=0,S=0,Z=0
        let mut r = Regs::new();
        r.a = 0x3C;
        r.f = 0;
        add8(&mut r, 0xFF);
        assert_eq!(r.a, 0x3B);
        assert!(r.flag(FLAG_C));
        assert!(r.flag(FLAG_H));
        assert!(!r.flag(FLAG_N));
        assert!(!r.flag(FLAG_PV));
        assert!(!r.flag(FLAG_S));
        assert!(!r.flag(FLAG_Z));
        assert_eq!(r.f & (FLAG_3 | FLAG_5), 0x3B & (FLAG_3 | FLAG_5));
    }

    #[test]
    fn daa_after_add_99_plus_1() {
        // 0x99 + 0x01 (BCD 99+1=100) with DAA should produce A=0x00, C=1.
        let mut r = Regs::new();
        r.a = 0x99;
        r.f = 0;
        add8(&mut r, 0x01);
        assert_eq!(r.a, 0x9A);
        daa(&mut r);
        assert_eq!(r.a, 0x00);
        assert!(r.flag(FLAG_C));
        assert!(r.flag(FLAG_Z));
    }

    #[test]
    fn inc_dec_overflow_flags() {
        let mut r = Regs::new();
        assert_eq!(inc8(&mut r, 0x7F), 0x80);
        assert!(r.flag(FLAG_PV));
        assert_eq!(dec8(&mut r, 0x80), 0x7F);
        assert!(r.flag(FLAG_PV));
    }

    #[test]
    fn cp_uses_operand_for_53_bits() {
        let mut r = Regs::new();
        r.a = 0x10;
        cp8(&mut r, 0x28);
        assert_eq!(r.a, 0x10); // A unchanged
        assert_eq!(r.f & (FLAG_3 | FLAG_5), 0x28 & (FLAG_3 | FLAG_5));
    }

    #[test]
    fn rlc_sets_carry_from_bit7() {
        let mut r = Regs::new();
        let result = rlc(&mut r, 0x80);
        assert_eq!(result, 0x01);
        assert!(r.flag(FLAG_C));
    }

    #[test]
    fn sll_feeds_one_into_bit0() {
        let mut r = Regs::new();
        let result = sll(&mut r, 0x01);
        assert_eq!(result, 0x03);
    }

    #[test]
    fn bit_test_zero_result() {
        let mut r = Regs::new();
        bit_test(&mut r, 3, 0b0000_0000, None);
        assert!(r.flag(FLAG_Z));
        assert!(r.flag(FLAG_PV));
    }
}

//! End-to-end decode tests: each concrete scenario drives real opcode
//! bytes through `step_one` rather than calling the ALU/regfile helpers
//! directly.

use super::step_one;
use crate::bus::{Bus, ROM_SIZE};
use crate::cpu::regs::{FLAG_53, FLAG_C, FLAG_H, FLAG_N, FLAG_PV, FLAG_S, FLAG_Z, IntMode, Regs};

fn bus_with_program(program: &[u8]) -> Bus {
    let mut bus = Bus::new();
    let mut rom = [0u8; ROM_SIZE];
    rom[..program.len()].copy_from_slice(program);
    bus.load_rom(&rom);
    bus
}

fn regs_at(pc: u16, sp: u16) -> Regs {
    let mut r = Regs::new();
    r.pc = pc;
    r.sp = sp;
    r
}

#[test]
fn scenario_add_a_a() {
    let mut bus = bus_with_program(&[0x87]); // ADD A,A
    let mut regs = regs_at(0, 0xF000);
    regs.a = 0x15;
    regs.f = 0x00;
    step_one(&mut regs, &mut bus);
    assert_eq!(regs.a, 0x2A);
    assert_eq!(regs.f, 0x28);
}

#[test]
fn scenario_add_a_ff() {
    let mut bus = bus_with_program(&[0xC6, 0xFF]); // ADD A,0xFF
    let mut regs = regs_at(0, 0xF000);
    regs.a = 0x3C;
    regs.f = 0x00;
    step_one(&mut regs, &mut bus);
    assert_eq!(regs.a, 0x3B);
    assert!(regs.flag(FLAG_C));
    assert!(regs.flag(FLAG_H));
    assert!(!regs.flag(FLAG_N));
    assert!(!regs.flag(FLAG_PV));
    assert!(!regs.flag(FLAG_S));
    assert!(!regs.flag(FLAG_Z));
    assert_eq!(regs.f & FLAG_53, 0x3B & FLAG_53);
}

#[test]
fn scenario_ldir_copies_block_and_clears_counter() {
    // HL=0x4000 (video), DE=0x5B00 (first RAM byte), BC=16.
    let mut bus = bus_with_program(&[0xED, 0xB0]); // LDIR
    for i in 0..16u16 {
        bus.write(0x4000 + i, i as u8 + 1);
    }
    let mut regs = regs_at(0, 0xF000);
    regs.set_hl(0x4000);
    regs.set_de(0x5B00);
    regs.set_bc(16);
    step_one(&mut regs, &mut bus);

    assert_eq!(regs.bc(), 0);
    assert!(!regs.flag(FLAG_PV));
    assert_eq!(regs.hl(), 0x4010);
    assert_eq!(regs.de(), 0x5B10);
    for i in 0..16u16 {
        assert_eq!(bus.read(0x5B00 + i), bus.read(0x4000 + i));
    }
}

#[test]
fn scenario_ex_sp_ix() {
    let mut bus = bus_with_program(&[0xDD, 0xE3]); // EX (SP),IX
    let mut regs = regs_at(0, 0xF000);
    regs.set_af(0x1234);
    regs.set_bc(0x5678);
    regs.set_de(0x9ABC);
    regs.set_hl(0xDEF0);
    regs.ix = 0x1111;
    regs.iy = 0x2222;
    regs.sp = regs.sp.wrapping_sub(2);
    bus.write_word(regs.sp, 0xCAFE);

    step_one(&mut regs, &mut bus);

    assert_eq!(regs.ix, 0xCAFE);
    assert_eq!(bus.read_word(regs.sp), 0x1111);
    assert_eq!(regs.memptr, 0xCAFE);
}

#[test]
fn scenario_halt_then_interrupt_pushes_pc_plus_one() {
    use crate::cpu::Cpu;

    let mut bus = bus_with_program(&[0x76]); // HALT at 0x0000
    let mut cpu = Cpu::new();
    cpu.regs.im = IntMode::Im1;
    cpu.regs.iff1 = true;
    cpu.regs.sp = 0xF000;

    cpu.step(&mut bus); // executes HALT, parks PC at 0
    assert!(cpu.regs.halted);
    assert_eq!(cpu.regs.pc, 0);

    cpu.regs.int_pending = true;
    cpu.step(&mut bus); // re-fetches HALT, then accepts the interrupt

    assert_eq!(cpu.regs.pc, 0x0038);
    assert!(!cpu.regs.iff1);
    assert_eq!(bus.read_word(cpu.regs.sp), 1);
}

#[test]
fn round_trip_ex_af_af_is_identity() {
    let mut bus = bus_with_program(&[0x08, 0x08]); // EX AF,AF' twice
    let mut regs = regs_at(0, 0xF000);
    regs.set_af(0xBEEF);
    regs.set_af_(0x1357);
    let before = regs.af();
    step_one(&mut regs, &mut bus);
    step_one(&mut regs, &mut bus);
    assert_eq!(regs.af(), before);
}

#[test]
fn round_trip_exx_is_identity() {
    let mut bus = bus_with_program(&[0xD9, 0xD9]); // EXX twice
    let mut regs = regs_at(0, 0xF000);
    regs.set_bc(0x1111);
    regs.set_de(0x2222);
    regs.set_hl(0x3333);
    let (bc, de, hl) = (regs.bc(), regs.de(), regs.hl());
    step_one(&mut regs, &mut bus);
    step_one(&mut regs, &mut bus);
    assert_eq!((regs.bc(), regs.de(), regs.hl()), (bc, de, hl));
}

#[test]
fn round_trip_push_pop_preserves_value_and_sp() {
    // PUSH BC ; POP BC
    let mut bus = bus_with_program(&[0xC5, 0xC1]);
    let mut regs = regs_at(0, 0xF000);
    regs.set_bc(0xABCD);
    let sp_before = regs.sp;
    step_one(&mut regs, &mut bus);
    step_one(&mut regs, &mut bus);
    assert_eq!(regs.bc(), 0xABCD);
    assert_eq!(regs.sp, sp_before);
}

#[test]
fn jr_taken_sets_memptr_to_destination() {
    // at PC=0, JR +2 lands on PC=4 (0 + 2-byte instruction + 2).
    let mut bus = bus_with_program(&[0x18, 0x02]); // JR +2
    let mut regs = regs_at(0, 0xF000);
    step_one(&mut regs, &mut bus);
    assert_eq!(regs.pc, 4);
    assert_eq!(regs.memptr, 4);
}

#[test]
fn outi_decrements_b_before_forming_port_and_latches_memptr() {
    // OUTI: B is the high byte of the port *after* decrementing.
    let mut bus = bus_with_program(&[0xED, 0xA3]); // OUTI
    let mut regs = regs_at(0, 0xF000);
    regs.set_bc(0x10_05);
    regs.set_hl(0x8000);
    bus.write(0x8000, 0x42);
    step_one(&mut regs, &mut bus);
    assert_eq!(regs.b, 0x0F);
    assert_eq!(regs.memptr, regs.bc().wrapping_add(1));
}

#[test]
fn round_trip_ld_nn_hl_then_ld_hl_nn() {
    // LD (0x5B10),HL ; LD HL,(0x5B10)
    let mut bus = bus_with_program(&[0x22, 0x10, 0x5B, 0x2A, 0x10, 0x5B]);
    let mut regs = regs_at(0, 0xF000);
    regs.set_hl(0x4242);
    step_one(&mut regs, &mut bus);
    regs.set_hl(0);
    step_one(&mut regs, &mut bus);
    assert_eq!(regs.hl(), 0x4242);
}

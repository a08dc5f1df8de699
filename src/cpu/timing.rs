//! Named T-state costs for the instruction groups used by the decode
//! planes. Values are the standard documented Z80 timings (no
//! sub-instruction bus-contention modeling, per spec §1 Non-goals).

pub const REG: u32 = 4;
pub const REG_RMW_HL: u32 = 11;
pub const HL_MEM: u32 = 7;
pub const IMM8: u32 = 7;
pub const IMM16: u32 = 10;
pub const LD_HL_N: u32 = 10;
pub const INC_DEC_RR: u32 = 6;
pub const ADD_HL_RR: u32 = 11;
pub const LD_NN_HL: u32 = 16; // LD (nn),HL / LD HL,(nn) (non-ED form)
pub const LD_NN_A: u32 = 13; // LD (nn),A / LD A,(nn)
pub const PUSH: u32 = 11;
pub const POP: u32 = 10;
pub const RST: u32 = 11;
pub const JP: u32 = 10;
pub const JR_TAKEN: u32 = 12;
pub const JR_NOT_TAKEN: u32 = 7;
pub const DJNZ_TAKEN: u32 = 13;
pub const DJNZ_NOT_TAKEN: u32 = 8;
pub const CALL_TAKEN: u32 = 17;
pub const CALL_NOT_TAKEN: u32 = 10;
pub const RET: u32 = 10;
pub const RET_CC_TAKEN: u32 = 11;
pub const RET_CC_NOT_TAKEN: u32 = 5;
pub const RETN: u32 = 14;
pub const EX_SP_HL: u32 = 19;
pub const CB_REG: u32 = 8;
pub const CB_HL: u32 = 15;
pub const BIT_REG: u32 = 8;
pub const BIT_HL: u32 = 12;

// DD/FD-indexed (IX+d)/(IY+d) variants.
pub const IDX_MEM_8: u32 = 19; // ALU A,(ix+d) / LD r,(ix+d) / LD (ix+d),r
pub const IDX_LD_N: u32 = 19; // LD (ix+d),n
pub const IDX_INC_DEC: u32 = 23;
pub const IDX_JP: u32 = 8;
pub const IDX_ADD_HL: u32 = 15;
pub const IDX_PUSH_POP: u32 = 15; // PUSH/POP IX/IY (POP is 14 but kept coarse per spec scope)
pub const IDX_POP: u32 = 14;
pub const IDX_EX_SP: u32 = 23;
pub const DDCB_BIT: u32 = 20;
pub const DDCB_RMW: u32 = 23;
pub const PREFIX_PENALTY: u32 = 4;

// ED-prefixed.
pub const ED_BLOCK: u32 = 16;
pub const ED_BLOCK_REPEAT: u32 = 21;
pub const ED_IO: u32 = 12;
pub const ED_IO_IMM: u32 = 11;
pub const ED_16_MEM: u32 = 20;
pub const ED_16_ALU: u32 = 15;
pub const ED_NEG: u32 = 8;
pub const ED_IM: u32 = 8;
pub const ED_IR: u32 = 9;
pub const ED_RRD_RLD: u32 = 18;
pub const ED_RETI: u32 = 14;
pub const ED_NOP: u32 = 8;

pub const IM1_ACCEPT: u32 = 13;
pub const IM2_ACCEPT: u32 = 19;

/*
Module: mappers

Declares the bank-switching boards beyond the direct-mapped mode that lives
in `crate::mapper`.

Implemented:
- MMC1 (Mapper 1)
*/

pub mod mmc1;

pub use mmc1::{Mmc1, Mmc1Register, ShiftRegister};

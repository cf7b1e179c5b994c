//! # HADLoC assembler and emulator
//!
//! A complete two-pass assembler and instruction-set emulator for HADLoC,
//! an 8-bit didactic computer.
//!
//! ## Pipeline
//!
//! Source text runs through six stages:
//!
//! 1. [`text`] - `PositionedText`, a source string that keeps a
//!    `(line, col)` coordinate for every character through slicing.
//! 2. [`lexer`] - tokenizes source into a flat `Token` stream.
//! 3. [`parser`] - parses tokens into a `PendingInstruction` list and a
//!    symbol table, resolving constant expressions as it goes.
//! 4. [`resolver`] - expands `ldb`/`ldu` placeholders that reference a
//!    label, once every label's final address is known.
//! 5. [`encoder`] - converts each resolved instruction into its one
//!    machine byte.
//! 6. [`emulator`] - executes the assembled bytes.
//!
//! [`assemble::assemble`] drives stages 2-5 end to end.
//!
//! ## Example
//!
//! ```rust,no_run
//! use hadloc_asm::assemble::assemble;
//!
//! let source = std::fs::read_to_string("program.hdc").unwrap();
//! match assemble(&source) {
//!     Ok(result) => println!("assembled {} bytes", result.bytes.len()),
//!     Err(err) => eprintln!("{err}"),
//! }
//! ```

pub mod assemble;
pub mod emulator;
pub mod encoder;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod resolver;
pub mod text;

pub mod fasta;

pub use fasta::{read_first_sequence, read_sequences, NamedSequence};

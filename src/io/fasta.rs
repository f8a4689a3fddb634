use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use noodles::fasta;
use tracing::debug;

use crate::errors::PairAlignError;

/// A sequence read from a FASTA file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamedSequence {
    pub name: String,
    pub sequence: Vec<u8>,
}

fn open_fasta(path: &Path) -> Result<Box<dyn BufRead>, PairAlignError> {
    let is_gzipped = path
        .file_name()
        .map(|v| v.to_string_lossy().ends_with(".gz"))
        .unwrap_or(false);

    let file = File::open(path)
        .map_err(|source| PairAlignError::FileReadError { source })?;

    let reader_inner: Box<dyn BufRead> = if is_gzipped {
        Box::new(BufReader::new(MultiGzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    };

    Ok(reader_inner)
}

/// Read all records from FASTA formatted data.
pub fn read_sequences_from<R: BufRead>(reader: R) -> Result<Vec<NamedSequence>, PairAlignError> {
    let mut reader = fasta::io::Reader::new(reader);

    let mut sequences = Vec::new();
    for result in reader.records() {
        let record = result?;

        sequences.push(NamedSequence {
            name: String::from_utf8_lossy(record.name()).into_owned(),
            sequence: record.sequence().as_ref().to_vec(),
        });
    }

    Ok(sequences)
}

/// Read all records from a FASTA file. Files ending in `.gz` are decompressed.
pub fn read_sequences(path: impl AsRef<Path>) -> Result<Vec<NamedSequence>, PairAlignError> {
    let path = path.as_ref();
    let sequences = read_sequences_from(open_fasta(path)?)?;
    debug!(path = %path.display(), records = sequences.len(), "read FASTA");

    Ok(sequences)
}

/// Read the first record of a FASTA file.
pub fn read_first_sequence(path: impl AsRef<Path>) -> Result<NamedSequence, PairAlignError> {
    read_sequences(path)?
        .into_iter()
        .next()
        .ok_or(PairAlignError::EmptyFasta)
}

#[cfg(test)]
mod tests {
    use super::read_sequences_from;

    #[test]
    fn test_read_from_memory() {
        let data = b">seq1 first\nGATT\nACA\n>seq2\nGCATGCU\n";
        let sequences = read_sequences_from(&data[..]).unwrap();

        assert_eq!(sequences.len(), 2);
        assert_eq!(sequences[0].name, "seq1");
        assert_eq!(sequences[0].sequence, b"GATTACA");
        assert_eq!(sequences[1].name, "seq2");
        assert_eq!(sequences[1].sequence, b"GCATGCU");
    }

    #[test]
    fn test_empty_input() {
        let sequences = read_sequences_from(&b""[..]).unwrap();
        assert!(sequences.is_empty());
    }
}

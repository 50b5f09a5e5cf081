//! In-memory word vector table with cosine similarity.
//!
//! Reads both word2vec formats. Text: an optional `<count> <dim>` header
//! line, then one `<word> <f32> <f32> ...` line per word. Binary: a
//! `<count> <dim>` header line, then per word the word bytes, a space and
//! `dim` little-endian f32 values. Files ending in `.bin` are read as binary.
//! Vectors are stored L2-normalized so similarity is a dot product.

use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ndarray::Array1;
use narrative_core::{Error, Result};

use crate::similarity::SimilarityProvider;

/// Word → unit-length embedding.
pub struct VectorTable {
    vectors: HashMap<String, Array1<f32>>,
    dim: usize,
}

impl VectorTable {
    /// Create an empty table of the given dimension.
    pub fn new(dim: usize) -> Self {
        Self {
            vectors: HashMap::new(),
            dim,
        }
    }

    /// Load vectors, choosing the format from the file extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.extension().is_some_and(|ext| ext == "bin") {
            Self::load_binary(path)
        } else {
            Self::load_text(path)
        }
    }

    /// Load vectors from a word2vec text file.
    pub fn load_text(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::read_text(BufReader::new(file))
    }

    /// Parse vectors from any reader in word2vec text format.
    pub fn read_text(reader: impl BufRead) -> Result<Self> {
        let mut table: Option<Self> = None;

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.is_empty() {
                continue;
            }

            // Header: "<count> <dim>"
            let is_header = fields.len() == 2 && fields.iter().all(|f| f.parse::<usize>().is_ok());
            if line_no == 0 && is_header {
                let dim: usize = fields[1].parse().unwrap_or(0);
                table = Some(Self::new(dim));
                continue;
            }

            let word = fields[0];
            let values = fields[1..]
                .iter()
                .map(|v| v.parse::<f32>())
                .collect::<std::result::Result<Vec<f32>, _>>()
                .map_err(|e| Error::Embedding(format!("line {}: {}", line_no + 1, e)))?;

            let table = table.get_or_insert_with(|| Self::new(values.len()));
            table
                .insert(word, Array1::from(values))
                .map_err(|e| Error::Embedding(format!("line {}: {}", line_no + 1, e)))?;
        }

        Ok(table.unwrap_or_else(|| Self::new(0)))
    }

    /// Load vectors from a word2vec binary file.
    pub fn load_binary(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::read_binary(BufReader::new(file))
    }

    /// Parse vectors from any reader in word2vec binary format.
    pub fn read_binary(mut reader: impl BufRead) -> Result<Self> {
        let mut header = String::new();
        reader.read_line(&mut header)?;
        let fields: Vec<usize> = header
            .split_whitespace()
            .map(str::parse)
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| Error::Embedding(format!("header: {}", e)))?;
        let [count, dim] = fields[..] else {
            return Err(Error::Embedding(format!(
                "header: expected '<count> <dim>', got '{}'",
                header.trim()
            )));
        };

        let mut table = Self::new(dim);
        let mut raw = vec![0u8; dim * 4];
        for i in 0..count {
            let mut word = Vec::new();
            reader.read_until(b' ', &mut word)?;
            if word.pop() != Some(b' ') {
                return Err(Error::Embedding(format!("entry {}: truncated word", i + 1)));
            }
            // Some writers put a newline after each vector.
            let word = String::from_utf8_lossy(&word);
            let word = word.trim_start_matches('\n');

            reader
                .read_exact(&mut raw)
                .map_err(|e| Error::Embedding(format!("entry {}: {}", i + 1, e)))?;
            let values: Vec<f32> = raw
                .chunks_exact(4)
                .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
                .collect();
            table
                .insert(word, Array1::from(values))
                .map_err(|e| Error::Embedding(format!("entry {}: {}", i + 1, e)))?;
        }
        Ok(table)
    }

    /// Insert a vector. It is normalized to unit length on the way in.
    pub fn insert(&mut self, word: &str, vector: Array1<f32>) -> Result<()> {
        if vector.len() != self.dim {
            return Err(Error::Embedding(format!(
                "vector for '{}' has dimension {}, expected {}",
                word,
                vector.len(),
                self.dim
            )));
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(Error::Embedding(format!(
                "vector for '{}' has a non-finite component",
                word
            )));
        }
        let norm = vector.dot(&vector).sqrt();
        let unit = if norm > 1e-9 { vector / norm } else { vector };
        self.vectors.insert(word.to_string(), unit);
        Ok(())
    }

    pub fn get(&self, word: &str) -> Option<&Array1<f32>> {
        self.vectors.get(word)
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl SimilarityProvider for VectorTable {
    /// Cosine similarity, with negative values clamped to 0.
    fn similarity(&self, word_a: &str, word_b: &str) -> Result<f64> {
        let a = self
            .get(word_a)
            .ok_or_else(|| Error::MissingVocabulary(word_a.to_string()))?;
        let b = self
            .get(word_b)
            .ok_or_else(|| Error::MissingVocabulary(word_b.to_string()))?;
        if word_a == word_b {
            return Ok(1.0);
        }
        Ok((a.dot(b) as f64).clamp(0.0, 1.0))
    }

    fn contains(&self, word: &str) -> bool {
        self.vectors.contains_key(word)
    }
}

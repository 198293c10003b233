//! Common types used throughout seqsieve

/// A FASTQ record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqRecord {
    /// Sequence identifier (first header token, without '@' prefix)
    pub id: String,
    /// Remainder of the header line after the identifier (may be empty)
    pub description: String,
    /// DNA/RNA sequence
    pub sequence: Vec<u8>,
    /// Quality scores (Phred+33)
    pub quality: Vec<u8>,
    /// Whitespace between `id` and `description` in the source header
    separator: String,
}

impl FastqRecord {
    /// Create a new FASTQ record with an empty description
    pub fn new(id: String, sequence: Vec<u8>, quality: Vec<u8>) -> Self {
        Self {
            id,
            description: String::new(),
            sequence,
            quality,
            separator: String::new(),
        }
    }

    /// Create a record from a raw header line (without the '@' prefix)
    ///
    /// The header is split at the first run of whitespace: the leading token
    /// becomes the `id`, the rest is kept verbatim as the `description`.
    /// The whitespace run itself is remembered, so [`header`](Self::header)
    /// gives back the input line unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use seqsieve::FastqRecord;
    ///
    /// let record = FastqRecord::from_header(
    ///     "SRR292678.1 2:N:0:1 BH:ok",
    ///     b"ACGT".to_vec(),
    ///     b"IIII".to_vec(),
    /// );
    /// assert_eq!(record.id, "SRR292678.1");
    /// assert_eq!(record.description, "2:N:0:1 BH:ok");
    /// ```
    pub fn from_header(header: &str, sequence: Vec<u8>, quality: Vec<u8>) -> Self {
        let (id, separator, description) = split_header(header);
        Self {
            id: id.to_string(),
            description: description.to_string(),
            sequence,
            quality,
            separator: separator.to_string(),
        }
    }

    /// Attach a description to the record
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Full header line (`id` followed by `description` when present)
    pub fn header(&self) -> String {
        join_header(&self.id, &self.separator, &self.description)
    }

    /// Check if the record has an empty sequence
    ///
    /// # Examples
    ///
    /// ```
    /// use seqsieve::FastqRecord;
    ///
    /// let empty = FastqRecord::new("read1".to_string(), Vec::new(), Vec::new());
    /// assert!(empty.is_empty());
    ///
    /// let non_empty = FastqRecord::new("read2".to_string(), b"ACGT".to_vec(), b"IIII".to_vec());
    /// assert!(!non_empty.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Sequence length in residues
    pub fn len(&self) -> usize {
        self.sequence.len()
    }
}

/// A FASTA record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// Sequence identifier (without '>' prefix)
    pub id: String,
    /// Header text following the identifier (may be empty)
    pub description: String,
    /// DNA/RNA/protein sequence
    pub sequence: Vec<u8>,
    separator: String,
}

impl FastaRecord {
    /// Create a new FASTA record with an empty description
    pub fn new(id: String, sequence: Vec<u8>) -> Self {
        Self {
            id,
            description: String::new(),
            sequence,
            separator: String::new(),
        }
    }

    /// Create a record from a raw header line (without the '>' prefix)
    ///
    /// Splits the same way as [`FastqRecord::from_header`].
    pub fn from_header(header: &str, sequence: Vec<u8>) -> Self {
        let (id, separator, description) = split_header(header);
        Self {
            id: id.to_string(),
            description: description.to_string(),
            sequence,
            separator: separator.to_string(),
        }
    }

    /// Attach a description to the record
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Full header line (`id` followed by `description` when present)
    pub fn header(&self) -> String {
        join_header(&self.id, &self.separator, &self.description)
    }
}

impl From<&FastqRecord> for FastaRecord {
    /// Drop the quality line, keeping the header exactly as read
    fn from(record: &FastqRecord) -> Self {
        Self {
            id: record.id.clone(),
            description: record.description.clone(),
            sequence: record.sequence.clone(),
            separator: record.separator.clone(),
        }
    }
}

/// `(id, separator, description)`; trailing whitespace and line endings are dropped
fn split_header(header: &str) -> (&str, &str, &str) {
    let header = header.trim_end();
    match header.find(char::is_whitespace) {
        Some(pos) => {
            let rest = &header[pos..];
            let description = rest.trim_start();
            let separator = &rest[..rest.len() - description.len()];
            (&header[..pos], separator, description)
        }
        None => (header, "", ""),
    }
}

fn join_header(id: &str, separator: &str, description: &str) -> String {
    if description.is_empty() {
        id.to_string()
    } else if separator.is_empty() {
        format!("{} {}", id, description)
    } else {
        format!("{}{}{}", id, separator, description)
    }
}

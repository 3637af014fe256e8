#[derive(Clone, Debug, PartialEq, Eq)]
/// Configuration of a rewrite run.
///
/// The [Default] values reproduce the conventional behavior: an unknown strand
/// (`.`) becomes `+`, and the `gene:` / `transcript:` prefixes that some
/// reference annotations (e.g. Ensembl GFF3 converted to GTF) put in front of
/// their identifiers are removed when the identifiers are renamed.
///
/// # Fields
///
/// * `unknown_strand`: the strand value that is replaced.
/// * `strand_fill`: the value written in place of `unknown_strand`.
/// * `gene_prefix`: a prefix removed from the `ref_gene_id` value when it becomes `gene_id`.
/// * `transcript_prefix`: a prefix removed from the `reference_id` value when it becomes `transcript_id`.
///
/// # Examples
///
/// ```rust
/// use refgtf::options::RewriteOptions;
///
/// let opts = RewriteOptions::default();
/// assert_eq!(opts.strand_fill, "+");
/// assert_eq!(opts.strip_gene_prefix("gene:ENSG0001"), "ENSG0001");
/// ```
pub struct RewriteOptions {
    pub unknown_strand: String,
    pub strand_fill: String,
    pub gene_prefix: String,
    pub transcript_prefix: String,
}

impl Default for RewriteOptions {
    fn default() -> Self {
        RewriteOptions {
            unknown_strand: String::from("."),
            strand_fill: String::from("+"),
            gene_prefix: String::from("gene:"),
            transcript_prefix: String::from("transcript:"),
        }
    }
}

impl RewriteOptions {
    /// Sets the value that replaces an unknown strand.
    pub fn with_strand_fill<T: ToString>(mut self, fill: T) -> Self {
        self.strand_fill = fill.to_string();
        self
    }

    /// Sets the prefixes removed from the reference gene and transcript identifiers.
    pub fn with_prefixes<T: ToString>(mut self, gene_prefix: T, transcript_prefix: T) -> Self {
        self.gene_prefix = gene_prefix.to_string();
        self.transcript_prefix = transcript_prefix.to_string();
        self
    }

    /// Removes one leading `gene_prefix` from `id`, if present.
    pub fn strip_gene_prefix<'a>(&self, id: &'a str) -> &'a str {
        id.strip_prefix(self.gene_prefix.as_str()).unwrap_or(id)
    }

    /// Removes one leading `transcript_prefix` from `id`, if present.
    pub fn strip_transcript_prefix<'a>(&self, id: &'a str) -> &'a str {
        id.strip_prefix(self.transcript_prefix.as_str())
            .unwrap_or(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_prefixes() {
        let opts = RewriteOptions::default();
        assert_eq!(opts.strip_gene_prefix("gene:G1"), "G1");
        assert_eq!(opts.strip_gene_prefix("G1"), "G1");
        // only a leading prefix is removed, and only once
        assert_eq!(opts.strip_gene_prefix("gene:gene:G1"), "gene:G1");
        assert_eq!(opts.strip_gene_prefix("Xgene:G1"), "Xgene:G1");
        assert_eq!(opts.strip_transcript_prefix("transcript:T1"), "T1");
        assert_eq!(opts.strip_transcript_prefix("gene:T1"), "gene:T1");
    }

    #[test]
    fn test_builders() {
        let opts = RewriteOptions::default()
            .with_strand_fill("-")
            .with_prefixes("g-", "t-");
        assert_eq!(opts.unknown_strand, ".");
        assert_eq!(opts.strand_fill, "-");
        assert_eq!(opts.strip_gene_prefix("g-G1"), "G1");
        assert_eq!(opts.strip_transcript_prefix("t-T1"), "T1");
        // an empty prefix leaves identifiers alone
        let opts = opts.with_prefixes("", "");
        assert_eq!(opts.strip_gene_prefix("gene:G1"), "gene:G1");
    }
}

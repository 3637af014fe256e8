use crate::options::RewriteOptions;
use crate::reader::AttributeList;
use crate::refgtf_utils::{
    is_passthrough_line, ATTRIBUTE_COLUMN, GENE_ID, GTF_N_COLUMNS, REFERENCE_ATTRIBUTES,
    REFERENCE_ID, REF_GENE_ID, STRAND_COLUMN, TRANSCRIPT_ID,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
/// Describes what happened to a single line during a rewrite.
///
/// # Variants
///
/// * `Passthrough` - A comment or blank line, written out unchanged.
/// * `Short` - A line with fewer than 9 tab-separated columns, written out unchanged.
/// * `Record` - A data line. `strand_normalized` is set if an unknown strand was
///   replaced, `renamed` is set if the reference identifiers were moved into
///   `gene_id`/`transcript_id`, and `skipped_attributes` counts the attribute
///   segments that could not be split into a key and a value.
pub enum LineOutcome {
    Passthrough,
    Short,
    Record {
        strand_normalized: bool,
        renamed: bool,
        skipped_attributes: usize,
    },
}

#[derive(Clone, Debug, Default)]
/// Rewrites GTF lines one at a time. A `Rewriter` holds only its
/// [RewriteOptions]; no state is carried from one line to the next.
pub struct Rewriter {
    options: RewriteOptions,
}

impl Rewriter {
    pub fn new(options: RewriteOptions) -> Rewriter {
        Rewriter { options }
    }

    pub fn options(&self) -> &RewriteOptions {
        &self.options
    }

    /// Rewrites one line. See [Rewriter::rewrite_record].
    pub fn rewrite(&self, line: &str) -> String {
        self.rewrite_record(line).0
    }

    /// Rewrites one line and reports what was done to it.
    ///
    /// * Comment and blank lines, and lines with fewer than 9 columns, are
    ///   returned exactly as given.
    /// * Otherwise the line is trimmed and split on tabs, an unknown strand
    ///   (`.`) is replaced by the strand fill, and, if the attributes contain
    ///   both `reference_id` and `ref_gene_id`, those two are replaced by
    ///   `transcript_id` and `gene_id` (with the `transcript:`/`gene:` prefixes
    ///   removed). The columns are joined again with tabs and a newline is appended.
    ///
    /// When the attributes lack either reference key, column 9 is copied
    /// verbatim, without being re-serialized.
    pub fn rewrite_record(&self, line: &str) -> (String, LineOutcome) {
        if is_passthrough_line(line) {
            return (line.to_string(), LineOutcome::Passthrough);
        }

        let mut fields: Vec<&str> = line.trim().split('\t').collect();
        if fields.len() < GTF_N_COLUMNS {
            return (line.to_string(), LineOutcome::Short);
        }

        let strand_normalized = fields[STRAND_COLUMN] == self.options.unknown_strand;
        if strand_normalized {
            fields[STRAND_COLUMN] = self.options.strand_fill.as_str();
        }

        let mut attrs = AttributeList::parse(fields[ATTRIBUTE_COLUMN]);
        let skipped_attributes = attrs.n_skipped();
        let renamed = self.rename_reference_ids(&mut attrs);
        let new_attrs;
        if renamed {
            new_attrs = attrs.to_gtf_string(&REFERENCE_ATTRIBUTES);
            fields[ATTRIBUTE_COLUMN] = new_attrs.as_str();
        }

        let mut out = fields.join("\t");
        out.push('\n');
        (
            out,
            LineOutcome::Record {
                strand_normalized,
                renamed,
                skipped_attributes,
            },
        )
    }

    /// Moves `ref_gene_id` into `gene_id` and `reference_id` into
    /// `transcript_id`. Returns `false`, leaving `attrs` untouched, unless
    /// both reference keys are present.
    fn rename_reference_ids(&self, attrs: &mut AttributeList) -> bool {
        let (Some(ref_gene), Some(ref_transcript)) = (attrs.get(REF_GENE_ID), attrs.get(REFERENCE_ID))
        else {
            return false;
        };

        let gene_id = self.options.strip_gene_prefix(ref_gene).to_string();
        let transcript_id = self
            .options
            .strip_transcript_prefix(ref_transcript)
            .to_string();

        attrs.insert(GENE_ID, gene_id);
        attrs.insert(TRANSCRIPT_ID, transcript_id);
        for key in REFERENCE_ATTRIBUTES {
            attrs.remove(key);
        }
        true
    }
}

/// Rewrites one GTF line with the default [RewriteOptions].
///
/// ```rust
/// let line = "chr1\tStringTie\texon\t11869\t12227\t.\t.\t.\treference_id \"transcript:T1\"; ref_gene_id \"gene:G1\"; exon_number \"1\";\n";
/// assert_eq!(
///     refgtf::rewrite(line),
///     "chr1\tStringTie\texon\t11869\t12227\t.\t+\t.\texon_number \"1\"; gene_id \"G1\"; transcript_id \"T1\";\n"
/// );
/// ```
pub fn rewrite(line: &str) -> String {
    Rewriter::default().rewrite(line)
}

//! `refgtf` rewrites GTF annotations produced against a reference annotation (for example by
//! [StringTie](https://ccb.jhu.edu/software/stringtie/) with `-G`) so that the reference
//! identifiers they carry, `reference_id` and `ref_gene_id`, become the `transcript_id` and
//! `gene_id` that downstream tools expect. Records with an unknown strand (`.`) are assigned
//! the `+` strand.
//!
//! Each line is handled on its own: comment, blank and short lines are copied unchanged, and
//! malformed attribute segments are dropped without complaint. The per-line logic lives in
//! [rewriter], the ordered attribute model in [reader::gtf], and the file-level driver in
//! [driver].

pub mod driver;
pub mod options;
pub mod reader;
pub mod refgtf_utils;
pub mod rewriter;
pub use driver::{rewrite_gtf_file, rewrite_stream, RewriteSummary};
pub use options::RewriteOptions;
pub use rewriter::{rewrite, LineOutcome, Rewriter};

pub mod gtf;
pub use gtf::AttributeList;

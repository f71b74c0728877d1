#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use od_edm as edm;
pub use od_formatter as formatter;
pub use od_utils as utils;

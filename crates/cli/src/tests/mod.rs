mod common;

mod explain;
mod parse_args;

use super::*;

use crate::tx::{TransactionOutpoint, UtxoEntry};
use std::collections::HashMap;

pub type UtxoCollection = HashMap<TransactionOutpoint, UtxoEntry>;

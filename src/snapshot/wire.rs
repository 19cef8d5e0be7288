use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Deserialize)]
pub(crate) struct SymbolsBody {
    #[serde(default)]
    pub(crate) symbols: BTreeMap<String, Vec<String>>,
}

#[derive(Deserialize)]
pub(crate) struct CreditsBody {
    pub(crate) credits: Option<i64>,
}

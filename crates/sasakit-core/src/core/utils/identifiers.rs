use phf::{Set, phf_set};

static MAIN_CHAIN_ATOM_NAMES: Set<&'static str> = phf_set! {
    "N", "H", "HN", "CA", "HA", "C", "O", "OXT", "H1", "H2", "H3",
    "HA2", "HA3", "OT1", "OT2", "HXT",
};

pub fn is_main_chain_atom(atom_name: &str) -> bool {
    MAIN_CHAIN_ATOM_NAMES.contains(atom_name.trim())
}

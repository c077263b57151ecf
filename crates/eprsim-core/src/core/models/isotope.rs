use phf::{Map, phf_map};

/// Nuclear spin quantum numbers of magnetic isotopes commonly resolved in EPR spectra.
///
/// Keys are written mass number first (`"14N"`), values are `I`.
pub static NUCLEAR_SPINS: Map<&'static str, f64> = phf_map! {
    "1H" => 0.5,
    "2H" => 1.0,
    "6Li" => 1.0,
    "7Li" => 1.5,
    "10B" => 3.0,
    "11B" => 1.5,
    "13C" => 0.5,
    "14N" => 1.0,
    "15N" => 0.5,
    "17O" => 2.5,
    "19F" => 0.5,
    "23Na" => 1.5,
    "25Mg" => 2.5,
    "27Al" => 2.5,
    "29Si" => 0.5,
    "31P" => 0.5,
    "33S" => 1.5,
    "35Cl" => 1.5,
    "37Cl" => 1.5,
    "39K" => 1.5,
    "51V" => 3.5,
    "55Mn" => 2.5,
    "57Fe" => 0.5,
    "59Co" => 3.5,
    "63Cu" => 1.5,
    "65Cu" => 1.5,
    "67Zn" => 2.5,
    "79Br" => 1.5,
    "81Br" => 1.5,
    "95Mo" => 2.5,
    "127I" => 2.5,
    "183W" => 0.5,
};

/// Accepts both `"14N"` and the element-first spelling `"N14"`.
pub fn nuclear_spin(symbol: &str) -> Option<f64> {
    let symbol = symbol.trim();
    if let Some(spin) = NUCLEAR_SPINS.get(symbol) {
        return Some(*spin);
    }

    let split = symbol.find(|c: char| c.is_ascii_digit())?;
    if split == 0 {
        return None;
    }
    let (element, mass) = symbol.split_at(split);
    NUCLEAR_SPINS.get(format!("{mass}{element}").as_str()).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_mass_first_symbols() {
        assert_eq!(nuclear_spin("1H"), Some(0.5));
        assert_eq!(nuclear_spin("14N"), Some(1.0));
        assert_eq!(nuclear_spin("55Mn"), Some(2.5));
    }

    #[test]
    fn accepts_element_first_symbols() {
        assert_eq!(nuclear_spin("N14"), Some(1.0));
        assert_eq!(nuclear_spin("Cu63"), Some(1.5));
    }

    #[test]
    fn unknown_symbols_return_none() {
        assert_eq!(nuclear_spin("12C"), None);
        assert_eq!(nuclear_spin("Xx"), None);
        assert_eq!(nuclear_spin(""), None);
    }

    #[test]
    fn every_spin_is_a_half_integer() {
        for (symbol, spin) in NUCLEAR_SPINS.entries() {
            let doubled = 2.0 * spin;
            assert_eq!(doubled, doubled.round(), "{symbol} has spin {spin}");
        }
    }
}

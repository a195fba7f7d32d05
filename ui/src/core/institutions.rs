//! Display colors and short codes for known institutions.

const KNOWN: &[(&str, &str, &str)] = &[
    ("Central Michigan University", "#6A0032", "CMU"),
    ("Eastern Michigan University", "#046A38", "EMU"),
    ("Ferris State University", "#BA0C2F", "Ferris"),
    ("Grand Valley State University", "#0032A0", "GVSU"),
    ("Lake Superior State University", "#6D6E71", "LSSU"),
    ("Michigan State University", "#18453B", "MSU"),
    ("Michigan Technological University", "#FFCD00", "MTU"),
    ("Northern Michigan University", "#095339", "NMU"),
    ("Oakland University", "#B59A57", "OU"),
    ("Saginaw Valley State University", "#6D6E71", "SVSU"),
    ("University of Michigan-Ann Arbor", "#00274C", "UM-AA"),
    ("University of Michigan-Dearborn", "#FFCB05", "UM-D"),
    ("University of Michigan-Flint", "#00274C", "UM-F"),
    ("Wayne State University", "#0C5449", "WSU"),
    ("Western Michigan University", "#532E1F", "WMU"),
];

const FALLBACK_COLORS: [&str; 8] = [
    "#0A9396", "#3D5A80", "#7B2CBF", "#BC4749", "#FF7F11", "#2A9D8F", "#8338EC", "#5F6C7B",
];

fn known(name: &str) -> Option<&'static (&'static str, &'static str, &'static str)> {
    KNOWN.iter().find(|(known, _, _)| *known == name)
}

/// Brand color, or a stable palette pick for unknown names.
pub fn color_for(name: &str) -> &'static str {
    match known(name) {
        Some(&(_, color, _)) => color,
        None => FALLBACK_COLORS[(name_hash(name).unsigned_abs() as usize) % FALLBACK_COLORS.len()],
    }
}

/// Short code, or the full name for unknown institutions.
pub fn code_for(name: &str) -> &str {
    match known(name) {
        Some(&(_, _, code)) => code,
        None => name,
    }
}

/// `h = h * 31 + unit` over UTF-16 code units with 32-bit wrap-around.
fn name_hash(name: &str) -> i32 {
    name.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(31).wrapping_add(i32::from(unit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_institutions_use_brand_values() {
        assert_eq!(color_for("Wayne State University"), "#0C5449");
        assert_eq!(code_for("University of Michigan-Dearborn"), "UM-D");
    }

    #[test]
    fn unknown_institutions_fall_back_deterministically() {
        let name = "Example College";
        assert_eq!(code_for(name), name);
        assert_eq!(color_for(name), color_for(name));
        assert!(FALLBACK_COLORS.contains(&color_for(name)));
    }

    #[test]
    fn hash_matches_the_string_hash_convention() {
        assert_eq!(name_hash(""), 0);
        assert_eq!(name_hash("a"), 97);
        assert_eq!(name_hash("ab"), 97 * 31 + 98);
        assert_eq!(color_for("a"), FALLBACK_COLORS[97 % 8]);
    }
}

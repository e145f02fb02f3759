//! Point-group classification and irrep renaming.
//!
//! DIRAC identifies irreps of the Abelian subgroup by fixed 4-character
//! labels. The point group is recovered by matching the first one or two
//! labels against a fixed catalog, in priority order; each catalog entry
//! also carries the replacement labels used to rename the whole sequence
//! to the readable notation.
//!
//! Classification is total: a label pair absent from the catalog is a
//! valid `Undetected` outcome, never an error.

use crate::error::FormatError;

/// One catalog entry: a label signature, the resulting point group, the
/// totally-symmetric-irrep marker and the replacement label table.
#[derive(Debug)]
pub struct CatalogEntry {
    first: &'static str,
    /// `None` matches any second label.
    second: Option<&'static str>,
    pub group: &'static str,
    /// DIRAC's literal marker value, preserved as-is. For the
    /// non-relativistic entries this is the double-group order (4, 8, 16,
    /// 32) rather than a valid irrep index; for the double-group entries
    /// it is index-like (1, 2, 4). Bounds-check before indexing with it.
    pub totally_symmetric: usize,
    renamed: &'static [&'static str],
}

impl CatalogEntry {
    /// Replaces `names` with this entry's readable labels.
    ///
    /// The table length is tied to the `num_irreps` this group implies;
    /// a longer actual sequence cannot be renamed safely.
    pub fn apply_renames(&self, names: &mut [String]) -> Result<(), FormatError> {
        if names.len() > self.renamed.len() {
            return Err(FormatError::RenameTableTooSmall {
                point_group: self.group,
                needed: names.len(),
                available: self.renamed.len(),
            });
        }
        for (name, renamed) in names.iter_mut().zip(self.renamed) {
            *name = (*renamed).to_string();
        }
        Ok(())
    }

    pub fn rename_table(&self) -> &'static [&'static str] {
        self.renamed
    }
}

#[derive(Debug)]
pub enum PointGroupMatch {
    Known(&'static CatalogEntry),
    Undetected,
}

/// Classifies the point group from the decoded irrep labels.
///
/// Pure and total over arbitrary label sequences, including empty ones.
pub fn classify(names: &[String]) -> PointGroupMatch {
    let first = names.first().map(String::as_str).unwrap_or("");
    let second = names.get(1).map(String::as_str).unwrap_or("");
    for entry in CATALOG {
        if entry.first == first && entry.second.is_none_or(|s| s == second) {
            return PointGroupMatch::Known(entry);
        }
    }
    PointGroupMatch::Undetected
}

/// Renames raw DIRAC labels to the readable notation in place.
///
/// Identity when the signature matches no catalog entry; in particular,
/// already-renamed labels match nothing, so renaming is idempotent.
pub fn rename_irreps(names: &mut [String]) -> Result<(), FormatError> {
    match classify(names) {
        PointGroupMatch::Known(entry) => entry.apply_renames(names),
        PointGroupMatch::Undetected => Ok(()),
    }
}

// Catalog order matters: within each family the pair signatures must come
// before the first-label-only ones (C1/C2 before D2, Ci/C2h before D2h).
static CATALOG: &[CatalogEntry] = &[
    // non-relativistic (spinfree) groups
    CatalogEntry {
        first: "A  a",
        second: Some("A  b"),
        group: "C1",
        totally_symmetric: 4,
        renamed: &["A_a", "A_b", "A_-3/2", "A_+3/2", "A_0", "A_2", "A_+1", "A_-1"],
    },
    CatalogEntry {
        first: "Ag a",
        second: Some("Au a"),
        group: "Ci",
        totally_symmetric: 8,
        renamed: &[
            "Ag_a", "Au_a", "Ag_b", "Au_b", "Ag_-3/2", "Au_-3/2", "Ag_+3/2", "Au_+3/2", "Ag_0",
            "Au_0", "Ag_2", "Au_2", "Ag_+1", "Au_+1", "Ag_-1", "Au_-1",
        ],
    },
    CatalogEntry {
        first: "A  a",
        second: Some("B  a"),
        group: "C2",
        totally_symmetric: 8,
        renamed: &[
            "A_a", "B_a", "A_b", "B_b", "A_-3/2", "B_-3/2", "A_+3/2", "B_+3/2", "A_0", "B_0",
            "A_2", "B_2", "A_+1", "B_+1", "A_-1", "B_-1",
        ],
    },
    CatalogEntry {
        first: "A' a",
        second: Some("A\" a"),
        group: "Cs",
        totally_symmetric: 8,
        renamed: &[
            "A'_a", "A\"_a", "A'_b", "A\"_b", "A'_-3/2", "A\"_-3/2", "A'_+3/2", "A\"_+3/2",
            "A'_0", "A\"_0", "A'_2", "A\"_2", "A'_+1", "A\"_+1", "A'_-1", "A\"_-1",
        ],
    },
    CatalogEntry {
        first: "A1 a",
        second: None,
        group: "C2v",
        totally_symmetric: 16,
        renamed: &[
            "A1_a", "B2_a", "B1_a", "A2_a", "A1_b", "B2_b", "B1_b", "A2_b", "A1_-3/2", "B2_-3/2",
            "B1_-3/2", "A2_-3/2", "A1_+3/2", "B2_+3/2", "B1_+3/2", "A2_+3/2", "A1_0", "B2_0",
            "B1_0", "A2_0", "A1_2", "B2_2", "B1_2", "A2_2", "A1_+1", "B2_+1", "B1_+1", "A2_+1",
            "A1_-1", "B2_-1", "B1_-1", "A2_-1",
        ],
    },
    CatalogEntry {
        first: "A  a",
        second: None,
        group: "D2",
        totally_symmetric: 16,
        renamed: &[
            "A_a", "B3_a", "B1_a", "B2_a", "A_b", "B3_b", "B1_b", "B2_b", "A_-3/2", "B3_-3/2",
            "B1_-3/2", "B2_-3/2", "A_+3/2", "B3_+3/2", "B1_+3/2", "B2_+3/2", "A_0", "B3_0",
            "B1_0", "B2_0", "A_2", "B3_2", "B1_2", "B2_2", "A_+1", "B3_+1", "B1_+1", "B2_+1",
            "A_-1", "B3_-1", "B1_-1", "B2_-1",
        ],
    },
    CatalogEntry {
        first: "Ag a",
        second: Some("Bg a"),
        group: "C2h",
        totally_symmetric: 16,
        renamed: &[
            "Ag_a", "Bg_a", "Bu_a", "Au_a", "Ag_b", "Bg_b", "Bu_b", "Au_b", "Ag_-3/2", "Bg_-3/2",
            "Bu_-3/2", "Au_-3/2", "Ag_+3/2", "Bg_+3/2", "Bu_+3/2", "Au_+3/2", "Ag_0", "Bg_0",
            "Bu_0", "Au_0", "Ag_2", "Bg_2", "Bu_2", "Au_2", "Ag_+1", "Bg_+1", "Bu_+1", "Au_+1",
            "Ag_-1", "Bg_-1", "Bu_-1", "Au_-1",
        ],
    },
    CatalogEntry {
        first: "Ag a",
        second: None,
        group: "D2h",
        totally_symmetric: 32,
        renamed: &[
            "Ag_a", "B1u_a", "B2u_a", "B3g_a", "B3u_a", "B2g_a", "B1g_a", "Au_a", "Ag_b",
            "B1u_b", "B2u_b", "B3g_b", "B3u_b", "B2g_b", "B1g_b", "Au_b", "Ag_-3/2", "B1u_-3/2",
            "B2u_-3/2", "B3g_-3/2", "B3u_-3/2", "B2g_-3/2", "B1g_-3/2", "Au_-3/2", "Ag_+3/2",
            "B1u_+3/2", "B2u_+3/2", "B3g_+3/2", "B3u_+3/2", "B2g_+3/2", "B1g_+3/2", "Au_+3/2",
            "Ag_0", "B1u_0", "B2u_0", "B3g_0", "B3u_0", "B2g_0", "B1g_0", "Au_0", "Ag_2",
            "B1u_2", "B2u_2", "B3g_2", "B3u_2", "B2g_2", "B1g_2", "Au_2", "Ag_+1", "B1u_+1",
            "B2u_+1", "B3g_+1", "B3u_+1", "B2g_+1", "B1g_+1", "Au_+1", "Ag_-1", "B1u_-1",
            "B2u_-1", "B3g_-1", "B3u_-1", "B2g_-1", "B1g_-1", "Au_-1",
        ],
    },
    // relativistic double groups
    CatalogEntry {
        first: "   A",
        second: Some("   a"),
        group: "C1",
        totally_symmetric: 1,
        renamed: &["A", "a"],
    },
    CatalogEntry {
        first: "  AG",
        second: Some("  AU"),
        group: "Ci",
        totally_symmetric: 2,
        renamed: &["AG", "AU", "ag", "au"],
    },
    CatalogEntry {
        first: "  1E",
        second: Some("  2E"),
        group: "C2, Cs, C2v or D2",
        totally_symmetric: 2,
        renamed: &["1E", "2E", "a", "b"],
    },
    CatalogEntry {
        first: " 1Eg",
        second: Some(" 2Eg"),
        group: "C2h or D2h",
        totally_symmetric: 4,
        renamed: &["1Eg", "2Eg", "1Eu", "2Eu", "ag", "bg", "au", "bu"],
    },
    CatalogEntry {
        first: "   1",
        second: Some("  -1"),
        group: "Cinfv",
        totally_symmetric: 32,
        renamed: &[
            "1/2+", "1/2-", "3/2+", "3/2-", "5/2+", "5/2-", "7/2+", "7/2-", "9/2+", "9/2-",
            "11/2+", "11/2-", "13/2+", "13/2-", "15/2+", "15/2-", "17/2+", "17/2-", "19/2+",
            "19/2-", "21/2+", "21/2-", "23/2+", "23/2-", "25/2+", "25/2-", "27/2+", "27/2-",
            "29/2+", "29/2-", "31/2+", "31/2-", "0", "1+", "1-", "2+", "2-", "3+", "3-", "4+",
            "4-", "5+", "5-", "6+", "6-", "7+", "7-", "8+", "8-", "9+", "9-", "10+", "10-",
            "11+", "11-", "12+", "12-", "13+", "13-", "14+", "14-", "15+", "15-", "16+",
        ],
    },
    CatalogEntry {
        first: "  1g",
        second: Some(" -1g"),
        group: "Dinfh",
        totally_symmetric: 32,
        renamed: &[
            "1/2g+", "1/2g-", "3/2g+", "3/2g-", "5/2g+", "5/2g-", "7/2g+", "7/2g-", "9/2g+",
            "9/2g-", "11/2g+", "11/2g-", "13/2g+", "13/2g-", "15/2g+", "15/2g-", "1/2u+",
            "1/2u-", "3/2u+", "3/2u-", "5/2u+", "5/2u-", "7/2u+", "7/2u-", "9/2u+", "9/2u-",
            "11/2u+", "11/2u-", "13/2u+", "13/2u-", "15/2u+", "15/2u-", "0g", "1g+", "1g-",
            "2g+", "2g-", "3g+", "3g-", "4g+", "4g-", "5g+", "5g-", "6g+", "6g-", "7g+", "7g-",
            "8g+", "0u", "1u+", "1u-", "2u+", "2u-", "3u+", "3u-", "4u+", "4u-", "5u+", "5u-",
            "6u+", "6u-", "7u+", "7u-", "8u+",
        ],
    },
];

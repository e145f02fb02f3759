use num_complex::Complex;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Byte width of the integers written by the producing DIRAC build.
///
/// The file itself never declares this; it is inferred from the byte size
/// of the first record before any structured decoding.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    Four,
    Eight,
}

impl IntWidth {
    pub const fn bytes(self) -> usize {
        match self {
            IntWidth::Four => 4,
            IntWidth::Eight => 8,
        }
    }
}

/// Arithmetic of the double group (`NZ` in DIRAC): raw code 1, 2 or 4.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupArithmetic {
    Real,
    Complex,
    Quaternion,
    Unknown,
}

impl GroupArithmetic {
    pub const fn from_raw(v: i64) -> Self {
        match v {
            1 => GroupArithmetic::Real,
            2 => GroupArithmetic::Complex,
            4 => GroupArithmetic::Quaternion,
            _ => GroupArithmetic::Unknown,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            GroupArithmetic::Real => "real",
            GroupArithmetic::Complex => "complex",
            GroupArithmetic::Quaternion => "quaternion",
            GroupArithmetic::Unknown => "unknown",
        }
    }
}

/// Fully decoded contents of one MRCONEE file.
///
/// Built field-by-field over one forward pass of the six records and handed
/// to the caller only on full success; never mutated afterwards.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone)]
pub struct Dataset {
    pub integer_width: IntWidth,
    pub num_spinors: usize,
    /// Core energy: inactive energy plus nuclear repulsion, in a.u.
    pub nuc_rep_energy: f64,
    /// Total SCF energy, in a.u.
    pub scf_energy: f64,
    pub arithmetic_kind: GroupArithmetic,
    pub spinfree: bool,
    /// 2 when the molecule has inversion symmetry, 1 otherwise.
    pub inversion_symmetry: u32,
    /// Number of irreps of the Abelian subgroup; always `2 * nsymrpa`.
    pub num_irreps: usize,
    /// Irrep names after renaming to the readable notation (raw DIRAC
    /// names when the point group was not detected).
    pub irrep_names: Vec<String>,
    /// Point group label, or `"undetected"`.
    pub point_group: String,
    /// Catalog marker for the totally symmetric irrep. DIRAC's literal
    /// values are preserved: for several non-relativistic groups this is a
    /// group order (4, 8, 16, 32), not a valid index into `irrep_names`.
    /// Callers must bounds-check before using it as an index.
    pub totally_symmetric_marker: usize,
    /// Cayley table of the Abelian subgroup, 0-based irrep indices.
    /// `multiplication_table[i][j]` is the product of irreps `i` and `j`.
    pub multiplication_table: Vec<Vec<usize>>,
    /// Per spinor: 0-based Abelian-subgroup irrep index.
    pub spinor_irreps: Vec<usize>,
    /// Per spinor: 1 if occupied in the reference determinant, else 0.
    pub occ_numbers: Vec<u8>,
    /// Per spinor: orbital energy in a.u.
    pub spinor_energies: Vec<f64>,
    /// One-electron Fock matrix, `num_spinors * num_spinors` elements in
    /// the linear order delivered by DIRAC (kept verbatim, no transpose).
    pub fock_matrix: Vec<Complex<f64>>,
}

impl Dataset {
    /// Fock matrix element at linear position `(i, j)` in delivered order.
    pub fn fock(&self, i: usize, j: usize) -> Complex<f64> {
        self.fock_matrix[i * self.num_spinors + j]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_codes_map_like_dirac() {
        assert_eq!(GroupArithmetic::from_raw(1), GroupArithmetic::Real);
        assert_eq!(GroupArithmetic::from_raw(2), GroupArithmetic::Complex);
        assert_eq!(GroupArithmetic::from_raw(4), GroupArithmetic::Quaternion);
        assert_eq!(GroupArithmetic::from_raw(3), GroupArithmetic::Unknown);
        assert_eq!(GroupArithmetic::from_raw(0), GroupArithmetic::Unknown);
        assert_eq!(GroupArithmetic::from_raw(-1), GroupArithmetic::Unknown);
    }

    #[test]
    fn width_bytes() {
        assert_eq!(IntWidth::Four.bytes(), 4);
        assert_eq!(IntWidth::Eight.bytes(), 8);
    }
}

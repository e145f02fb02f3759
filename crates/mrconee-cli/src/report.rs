use std::io::{self, Write};

use mrconee_core::types::Dataset;

/// Renders the human-readable summary and per-spinor table.
///
/// Read-only over the dataset. The totally-symmetric-irrep line prints
/// `n/a` when the catalog marker is not a valid index into the irrep
/// names (true for every non-relativistic group, where DIRAC's marker is
/// a group order rather than an index).
pub(crate) fn print_dataset(out: &mut impl Write, data: &Dataset) -> io::Result<()> {
    let totally_symmetric = data
        .irrep_names
        .get(data.totally_symmetric_marker)
        .map(String::as_str)
        .unwrap_or("n/a");

    writeln!(out)?;
    writeln!(
        out,
        " size of integers in DIRAC                          {} bytes",
        data.integer_width.bytes()
    )?;
    writeln!(
        out,
        " number of spinors                                  {}",
        data.num_spinors
    )?;
    writeln!(
        out,
        " core energy (inactive energy + nuclear repulsion)  {:.12} a.u.",
        data.nuc_rep_energy
    )?;
    writeln!(
        out,
        " total SCF energy                                   {:.12} a.u.",
        data.scf_energy
    )?;
    writeln!(
        out,
        " double group type                                  {}",
        data.arithmetic_kind.label()
    )?;
    writeln!(
        out,
        " spin-free                                          {}",
        if data.spinfree { "yes" } else { "no" }
    )?;
    writeln!(
        out,
        " Abelian subgroup                                   {}",
        data.point_group
    )?;
    writeln!(
        out,
        " totally symmetric irrep                            {totally_symmetric}"
    )?;
    writeln!(
        out,
        " number of irreps in the Abelian subgroup           {}",
        data.num_irreps
    )?;
    writeln!(out)?;

    writeln!(out, " spinors info:")?;
    writeln!(out, " -----------------------------------------------------")?;
    writeln!(out, "   no       irrep     occ      one-electron energy    ")?;
    writeln!(out, " -----------------------------------------------------")?;
    for i in 0..data.num_spinors {
        writeln!(
            out,
            " {:4}{:>12}{:8}{:25.8}",
            i + 1,
            data.irrep_names[data.spinor_irreps[i]],
            data.occ_numbers[i],
            data.spinor_energies[i]
        )?;
    }
    writeln!(out, " -----------------------------------------------------")?;
    writeln!(out)
}

use std::path::Path;

use mrconee_core::error::{Error, FormatError};
use mrconee_core::symmetry::{classify, PointGroupMatch};
use mrconee_core::types::{Dataset, GroupArithmetic, IntWidth};
use num_complex::Complex;

use crate::unformatted::{RecordCursor, UnfFile};

// record 1 holds 6 integers and 2 reals; its byte size is the only signal
// of the integer width used by the producing DIRAC build
const REC1_SIZE_I4: u32 = 6 * 4 + 2 * 8;
const REC1_SIZE_I8: u32 = 6 * 8 + 2 * 8;

// fixed buffer bounds inherited from DIRAC's own layout
const MAX_FERMION_IRREPS: usize = 8;
const MAX_ABELIAN_IRREPS: usize = 64;

/// Infers the integer width from the first record's byte size.
///
/// Opens a fresh transport session and closes it again; the caller must
/// reopen the file for the actual decode. This check precedes every other
/// decode step, so the file must be openable twice from the start.
pub fn probe_integer_width(path: impl AsRef<Path>) -> Result<IntWidth, Error> {
    let unf = UnfFile::open(path)?;
    let size = unf.next_record_size()?;
    match size {
        REC1_SIZE_I4 => Ok(IntWidth::Four),
        REC1_SIZE_I8 => Ok(IntWidth::Eight),
        size => Err(FormatError::UnknownIntegerWidth { size }.into()),
    }
}

/// Decodes a complete MRCONEE file.
///
/// Runs the width probe on one session, then decodes the six records in
/// fixed order on a second. All-or-nothing: the first failure aborts the
/// decode and no partially populated dataset is ever returned.
pub fn read_mrconee(path: impl AsRef<Path>) -> Result<Dataset, Error> {
    let path = path.as_ref();
    let width = probe_integer_width(path)?;
    let mut unf = UnfFile::open(path)?;

    let header = decode_header(&mut unf, width)?;
    let mut quotas = decode_fermion_occupations(&mut unf, width, header.inversion_symmetry)?;
    let irreps = decode_abelian_irreps(&mut unf, width)?;
    let num_irreps = irreps.names.len();
    let multiplication_table = decode_multiplication_table(&mut unf, width, num_irreps)?;
    let spinors = decode_spinor_info(&mut unf, width, header.num_spinors, num_irreps, &mut quotas)?;
    let fock_matrix = decode_fock_matrix(&mut unf, width, header.num_spinors)?;

    Ok(Dataset {
        integer_width: width,
        num_spinors: header.num_spinors,
        nuc_rep_energy: header.nuc_rep_energy,
        scf_energy: header.scf_energy,
        arithmetic_kind: header.arithmetic_kind,
        spinfree: header.spinfree,
        inversion_symmetry: header.inversion_symmetry,
        num_irreps,
        irrep_names: irreps.names,
        point_group: irreps.point_group,
        totally_symmetric_marker: irreps.totally_symmetric_marker,
        multiplication_table,
        spinor_irreps: spinors.irreps,
        occ_numbers: spinors.occ_numbers,
        spinor_energies: spinors.energies,
        fock_matrix,
    })
}

struct Header {
    num_spinors: usize,
    nuc_rep_energy: f64,
    scf_energy: f64,
    arithmetic_kind: GroupArithmetic,
    spinfree: bool,
    inversion_symmetry: u32,
}

/// Record 1: spinor count, energies, symmetry flags.
fn decode_header(unf: &mut UnfFile, width: IntWidth) -> Result<Header, FormatError> {
    let rec = unf.read_record()?;
    let mut cur = RecordCursor::new(rec, width).with_schema("header", 8);

    let num_spinors = cur.read_int()?;
    let _breit = cur.read_int()?;
    let nuc_rep_energy = cur.read_f64()?;
    let invsym = cur.read_int()?;
    let nz_arith = cur.read_int()?;
    let is_spinfree = cur.read_int()?;
    let _norb_total = cur.read_int()?;
    let scf_energy = cur.read_f64()?;

    if num_spinors < 0 {
        return Err(FormatError::InvalidValue {
            field: "num_spinors",
            reason: "must be non-negative",
        });
    }
    if invsym != 1 && invsym != 2 {
        return Err(FormatError::InvalidValue {
            field: "inversion_symmetry",
            reason: "must be 1 or 2",
        });
    }

    Ok(Header {
        num_spinors: num_spinors as usize,
        nuc_rep_energy,
        scf_energy,
        arithmetic_kind: GroupArithmetic::from_raw(nz_arith),
        spinfree: is_spinfree != 0,
        inversion_symmetry: invsym as u32,
    })
}

/// Record 2: per-fermion-irrep electron quotas of the parent group.
///
/// Sub-array lengths are controlled by scalars decoded earlier in the same
/// decode (`nsymrp` here, `inversion_symmetry` from record 1), so they are
/// threaded in as explicit sizes. Only the active-spinor counts survive;
/// the irrep labels and the frozen/deleted orbital counts are decoded and
/// discarded.
fn decode_fermion_occupations(
    unf: &mut UnfFile,
    width: IntWidth,
    inversion_symmetry: u32,
) -> Result<Vec<i64>, FormatError> {
    let invsym = inversion_symmetry as usize;
    let rec = unf.read_record()?;
    let mut cur = RecordCursor::new(rec, width).with_schema("fermion irrep occupations", 8);

    let nsymrp = cur.read_int()?;
    if nsymrp < 0 || nsymrp as usize > MAX_FERMION_IRREPS {
        return Err(FormatError::InvalidValue {
            field: "nsymrp",
            reason: "fermion irrep count must be between 0 and 8",
        });
    }
    let nsymrp = nsymrp as usize;

    let _labels = cur.read_bytes(14 * nsymrp)?;
    let nactive = cur.read_int_array(nsymrp)?;
    let _norb_per_ircop = cur.read_int_array(invsym)?;
    let _nfrozen_total = cur.read_int_array(invsym)?;
    let _nfrozen_positive = cur.read_int_array(invsym)?;
    let _nfrozen_negative = cur.read_int_array(invsym)?;
    let _ndeleted = cur.read_int_array(invsym)?;

    Ok(nactive)
}

struct AbelianIrreps {
    names: Vec<String>,
    point_group: String,
    totally_symmetric_marker: usize,
}

/// Record 3: irrep names of the Abelian subgroup, point group, renaming.
///
/// The record's character-array length depends on the leading count inside
/// the same record, so it is read twice: first only the count, then, after
/// rewinding one record, the whole record with the now-known length.
fn decode_abelian_irreps(unf: &mut UnfFile, width: IntWidth) -> Result<AbelianIrreps, FormatError> {
    let rec = unf.read_record()?;
    let nsymrpa = RecordCursor::new(rec, width).read_int()?;
    if nsymrpa < 0 || 2 * nsymrpa as usize > MAX_ABELIAN_IRREPS {
        return Err(FormatError::InvalidValue {
            field: "nsymrpa",
            reason: "abelian irrep pair count must be between 0 and 32",
        });
    }
    let num_irreps = 2 * nsymrpa as usize;

    unf.backspace();
    let rec = unf.read_record()?;
    let mut cur = RecordCursor::new(rec, width);
    let _nsymrpa = cur.read_int()?;
    let raw_names = cur.read_bytes(4 * num_irreps)?;

    let mut names: Vec<String> = raw_names
        .chunks_exact(4)
        .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
        .collect();

    let (point_group, totally_symmetric_marker) = match classify(&names) {
        PointGroupMatch::Known(entry) => {
            entry.apply_renames(&mut names)?;
            (entry.group.to_string(), entry.totally_symmetric)
        }
        PointGroupMatch::Undetected => ("undetected".to_string(), 0),
    };

    Ok(AbelianIrreps {
        names,
        point_group,
        totally_symmetric_marker,
    })
}

/// Record 4: Cayley table of the Abelian subgroup.
///
/// The file stores element `k = j * n + i` for logical `table[i][j]`; the
/// transposition happens here, along with the shift to 0-based indices.
fn decode_multiplication_table(
    unf: &mut UnfFile,
    width: IntWidth,
    num_irreps: usize,
) -> Result<Vec<Vec<usize>>, FormatError> {
    let n = num_irreps;
    let rec = unf.read_record()?;
    let mut cur = RecordCursor::new(rec, width).with_schema("multiplication table", 1);
    let raw = cur.read_int_array(n * n)?;

    let mut table = vec![vec![0usize; n]; n];
    for i in 0..n {
        for j in 0..n {
            let v = raw[j * n + i];
            if v < 1 || v as usize > n {
                return Err(FormatError::InvalidValue {
                    field: "multiplication_table",
                    reason: "entry is not a valid 1-based irrep index",
                });
            }
            table[i][j] = v as usize - 1;
        }
    }
    Ok(table)
}

struct SpinorInfo {
    irreps: Vec<usize>,
    occ_numbers: Vec<u8>,
    energies: Vec<f64>,
}

/// Record 5: per-spinor irrep indices and energies, plus the greedy
/// occupation assignment.
///
/// The record is one raw blob of `num_spinors * (2 * width + 8)` bytes;
/// each spinor contributes two width-sized integers (1-based parent-group
/// and Abelian-subgroup irrep indices) and one 8-byte energy.
///
/// Occupation consumes the record-2 quotas destructively in file order: a
/// spinor is occupied iff its parent irrep still has quota left. No
/// sorting, no lookahead. Occupying the lowest spinors first is correct
/// only because DIRAC emits spinors within each irrep in non-decreasing
/// energy order; that is a precondition on the producer, not something
/// this decoder enforces.
fn decode_spinor_info(
    unf: &mut UnfFile,
    width: IntWidth,
    num_spinors: usize,
    num_irreps: usize,
    quotas: &mut [i64],
) -> Result<SpinorInfo, FormatError> {
    let element_size = 2 * width.bytes() + 8;
    let rec = unf.read_record()?;
    // the count comes from record 1 and is untrusted; checked arithmetic
    // keeps an absurd value from wrapping past the length comparison
    let expected = num_spinors
        .checked_mul(element_size)
        .ok_or(FormatError::InvalidValue {
            field: "num_spinors",
            reason: "spinor block size overflows",
        })?;
    if rec.len() != expected {
        return Err(FormatError::SpinorBlockLength {
            expected,
            actual: rec.len(),
        });
    }

    let mut irreps = Vec::with_capacity(num_spinors);
    let mut occ_numbers = Vec::with_capacity(num_spinors);
    let mut energies = Vec::with_capacity(num_spinors);

    let mut cur = RecordCursor::new(rec, width);
    for _ in 0..num_spinors {
        let parent = cur.read_int()?;
        let abelian = cur.read_int()?;
        let energy = cur.read_f64()?;

        if parent < 1 || parent as usize > quotas.len() {
            return Err(FormatError::InvalidValue {
                field: "spinor parent irrep",
                reason: "1-based index outside the fermion irrep range",
            });
        }
        if abelian < 1 || abelian as usize > num_irreps {
            return Err(FormatError::InvalidValue {
                field: "spinor abelian irrep",
                reason: "1-based index outside the abelian irrep range",
            });
        }

        irreps.push(abelian as usize - 1);
        energies.push(energy);

        let quota = &mut quotas[parent as usize - 1];
        if *quota > 0 {
            *quota -= 1;
            occ_numbers.push(1);
        } else {
            occ_numbers.push(0);
        }
    }

    Ok(SpinorInfo {
        irreps,
        occ_numbers,
        energies,
    })
}

/// Record 6: the one-electron Fock matrix, kept in delivered order.
fn decode_fock_matrix(
    unf: &mut UnfFile,
    width: IntWidth,
    num_spinors: usize,
) -> Result<Vec<Complex<f64>>, FormatError> {
    let count = num_spinors
        .checked_mul(num_spinors)
        .ok_or(FormatError::InvalidValue {
            field: "num_spinors",
            reason: "fock matrix element count overflows",
        })?;
    let rec = unf.read_record()?;
    let mut cur = RecordCursor::new(rec, width).with_schema("fock matrix", 1);
    cur.read_complex_array(count)
}

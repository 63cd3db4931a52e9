//! Integration tests for the Inverse-Gamma mixture pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end flow: PDB text → occupancy-filtered B-factors →
//!   EM fit → query surface → report document.
//! - Exercise realistic two-population data drawn from known shifted
//!   Inverse-Gamma distributions rather than toy inputs only.
//!
//! Coverage
//! --------
//! - `ingest::pdb`: reading a structure file from disk.
//! - `mixture::models::igmm::InverseGammaMixture`: K = 1 and K = 2 fits,
//!   configuration errors, query surface, standard errors, report.
//! - `mixture::core::distribution`: density of a fitted mode integrates
//!   to 1.
//! - `mixture::core::fisher`: block-diagonal Fisher matrix for disjoint
//!   responsibilities.
//!
//! Exclusions
//! ----------
//! - Formula-level checks of gradients, special functions and damping;
//!   those are covered by unit tests.
use bfactor_mixtures::{
    ingest::read_pdb,
    mixture::{
        core::{
            data::BFactorData, fisher::calc_fisher_matrix, options::MixtureOptions,
            params::IGComponents, responsibilities::Responsibilities,
        },
        errors::MixtureError,
        models::{base::MixtureFamily, igmm::InverseGammaMixture},
    },
};
use ndarray::{Array1, array};
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, Gamma};
use serde_json::Value;
use std::io::Write;

/// Purpose
/// -------
/// Draw `n` values of `shift + 1/G` with `G ~ Gamma(alpha, scale = 1/betta)`,
/// i.e. a shifted Inverse-Gamma(alpha, betta) sample.
fn shifted_inv_gamma(rng: &mut StdRng, n: usize, alpha: f64, betta: f64, shift: f64) -> Vec<f64> {
    let gamma = Gamma::new(alpha, 1.0 / betta).unwrap();
    (0..n).map(|_| shift + 1.0 / gamma.sample(rng)).collect()
}

/// Purpose
/// -------
/// Two well-separated populations with their generating labels.
fn two_populations() -> (BFactorData, Responsibilities) {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut values = shifted_inv_gamma(&mut rng, 300, 4.0, 30.0, 5.0);
    values.extend(shifted_inv_gamma(&mut rng, 200, 6.0, 150.0, 40.0));
    let labels: Vec<usize> = (0..500).map(|i| usize::from(i >= 300)).collect();
    (
        BFactorData::new(Array1::from(values)).unwrap(),
        Responsibilities::from_labels(&labels, 2).unwrap(),
    )
}

/// Purpose
/// -------
/// Render one fixed-column PDB coordinate record.
fn atom_line(serial: usize, occupancy: f64, b_iso: f64) -> String {
    format!(
        "ATOM  {serial:>5} {name:<4} {res:>3} {chain}{seq:>4}    {x:>8.3}{y:>8.3}{z:>8.3}{occupancy:>6.2}{b_iso:>6.2}           C",
        name = "CA",
        res = "ALA",
        chain = 'A',
        seq = serial,
        x = 1.0,
        y = 2.0,
        z = 3.0,
    )
}

#[test]
// Purpose
// -------
// K = 1 scenario: the fit never ends worse than it started.
//
// Given
// -----
// - Observations [1.0, 1.2, 1.5, 2.0, 3.0, 5.0], default tol / max_iter.
//
// Expect
// ------
// - Finite final objective ≤ initial objective.
// - Single mode with mix = 1 and parameters above the floor.
fn single_mode_fit_is_monotone_overall() {
    let data = BFactorData::new(array![1.0, 1.2, 1.5, 2.0, 3.0, 5.0]).unwrap();
    let mut model = InverseGammaMixture::new(MixtureOptions::default().with_seed(11));

    let out = model.fit(&data, None).unwrap();

    assert!(out.objective.is_finite());
    assert!(out.objective <= out.initial_objective);
    let params = model.params().unwrap();
    assert_eq!(params.mix, vec![1.0]);
    assert!(params.alpha[0] >= 0.1 && params.betta[0] >= 0.1);
    assert!(!out.status.is_empty());
}

#[test]
// Purpose
// -------
// A seeded two-population fit recovers the ordering and proportions of the
// generating modes.
//
// Expect
// ------
// - Mixing weights sum to 1 and are close to 0.6 / 0.4.
// - The second mode sits to the right of the first.
// - Seeded fits are reproducible.
fn two_mode_fit_separates_populations() {
    let (data, z) = two_populations();
    let options = MixtureOptions::new(2, 1e-5, 100, Some(3)).unwrap();

    let mut model = InverseGammaMixture::new(options);
    let out = model.fit(&data, Some(z.clone())).unwrap();
    let mut twin = InverseGammaMixture::new(options);
    let twin_out = twin.fit(&data, Some(z)).unwrap();

    assert!(out.objective.is_finite());
    let params = model.params().unwrap();
    let total: f64 = params.mix.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert!((params.mix[0] - 0.6).abs() < 0.1, "mix = {:?}", params.mix);
    let fitted = model.fitted().unwrap();
    assert!(fitted.modes()[0].ppf(0.5).unwrap() < fitted.modes()[1].ppf(0.5).unwrap());
    assert_eq!(out, twin_out);
    assert_eq!(params, twin.params().unwrap());
}

#[test]
// Purpose
// -------
// K = 2 without responsibilities on a fresh model is a configuration error.
fn missing_responsibilities_fails_before_fitting() {
    let data = BFactorData::new(array![1.0, 2.0, 3.0]).unwrap();
    let mut model = InverseGammaMixture::new(MixtureOptions::new(2, 1e-5, 100, None).unwrap());

    let err = model.fit(&data, None).unwrap_err();

    assert_eq!(err, MixtureError::MissingResponsibilities { n_modes: 2 });
    assert_eq!(model.params().unwrap_err(), MixtureError::ModelNotFitted);
}

#[test]
// Purpose
// -------
// Rows alternating [1, 0] / [0, 1] give a Fisher matrix with exactly zero
// cross-mode entries.
fn alternating_responsibilities_give_block_diagonal_fisher() {
    let data = BFactorData::new(array![10.0, 20.0, 11.0, 22.0, 12.5, 25.0, 14.0, 30.0]).unwrap();
    let z = Responsibilities::from_labels(&[0, 1, 0, 1, 0, 1, 0, 1], 2).unwrap();
    let comps = IGComponents::new(array![3.5, 3.5], array![8.0, 20.0], array![9.0, 18.0]);
    let mix = array![0.5, 0.5];

    let bundle = calc_fisher_matrix(data.values(), &z, &mix, &comps);

    for i in 0..3 {
        for j in 3..6 {
            assert_eq!(bundle.hessian[[i, j]], 0.0);
            assert_eq!(bundle.hessian[[j, i]], 0.0);
        }
    }
    assert!(bundle.loglike.is_finite());
}

#[test]
// Purpose
// -------
// The fitted single-mode query surface obeys cdf(ppf(p)) ≈ p and the
// mixture density is non-negative.
fn fitted_query_surface_round_trips() {
    let mut rng = StdRng::seed_from_u64(5);
    let data = BFactorData::new(Array1::from(shifted_inv_gamma(&mut rng, 400, 5.0, 80.0, 10.0)))
        .unwrap();
    let mut model = InverseGammaMixture::new(MixtureOptions::default().with_seed(5));
    model.fit(&data, None).unwrap();

    let p = array![0.01, 0.25, 0.5, 0.75, 0.99];
    let q = model.ppf(&p).unwrap();
    let back = model.cdf(&q.column(0).to_owned()).unwrap();
    for i in 0..p.len() {
        assert!((back[[i, 0]] - p[i]).abs() < 1e-8);
    }
    assert!(model.mixture_pdf(data.values()).unwrap().iter().all(|&d| d >= 0.0));

    let se = model.standard_errors(&data).unwrap();
    assert_eq!(se.len(), 3);
    assert!(se.iter().all(|s| s.is_finite() && *s >= 0.0));
}

#[test]
// Purpose
// -------
// The density of a fitted K = 1 mode integrates to 1.
//
// Given
// -----
// - 400 seeded draws from a shifted Inverse-Gamma(5, 80) with shift 10.
//
// Expect
// ------
// - Composite Simpson over [shift, ppf(1 − 1e-9)] is within 1e-4 of 1.
fn fitted_single_mode_density_integrates_to_one() {
    let mut rng = StdRng::seed_from_u64(17);
    let data = BFactorData::new(Array1::from(shifted_inv_gamma(&mut rng, 400, 5.0, 80.0, 10.0)))
        .unwrap();
    let mut model = InverseGammaMixture::new(MixtureOptions::default().with_seed(17));
    model.fit(&data, None).unwrap();

    let fitted = model.fitted().unwrap();
    let mode = &fitted.modes()[0];
    let (a, b) = (mode.shift(), mode.ppf(1.0 - 1e-9).unwrap());
    let m = 200_000;
    let h = (b - a) / m as f64;
    let mut s = mode.pdf(a) + mode.pdf(b);
    for i in 1..m {
        let w = if i % 2 == 1 { 4.0 } else { 2.0 };
        s += w * mode.pdf(a + i as f64 * h);
    }
    let integral = s * h / 3.0;

    assert!((integral - 1.0).abs() < 1e-4, "integral = {integral}");
}

#[test]
// Purpose
// -------
// End to end from a PDB file on disk to a written report.
//
// Given
// -----
// - A temporary PDB file with occupied and unoccupied atoms.
//
// Expect
// ------
// - Unoccupied atoms are dropped before fitting.
// - The report JSON contains the input echo and the three image keys.
fn pdb_to_report_pipeline() {
    let mut rng = StdRng::seed_from_u64(9);
    let b_values = shifted_inv_gamma(&mut rng, 80, 4.0, 40.0, 8.0);
    let mut pdb = String::from("REMARK   2 RESOLUTION.    1.90 ANGSTROMS.\n");
    for (i, b) in b_values.iter().enumerate() {
        pdb.push_str(&atom_line(i + 1, 1.0, b.min(999.0)));
        pdb.push('\n');
    }
    pdb.push_str(&atom_line(81, 0.0, 12.0));
    pdb.push_str("\nEND\n");
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(pdb.as_bytes()).unwrap();

    let structure = read_pdb(file.path()).unwrap();
    let data = structure.b_factors().unwrap();
    assert_eq!(data.len(), 80);
    assert_eq!(structure.resolution_or_default(), 1.9);

    let mut model = InverseGammaMixture::new(MixtureOptions::default().with_seed(9));
    model.fit(&data, None).unwrap();
    let report = model.report(&data, "model.pdb").unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let out_path = out_dir.path().join("model.igmm.json");
    report.write_json(&out_path).unwrap();

    let json: Value = serde_json::from_str(&std::fs::read_to_string(&out_path).unwrap()).unwrap();
    let keys: Vec<&str> = json["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|item| item["type"] == "image")
        .map(|item| item["key"].as_str().unwrap())
        .collect();
    let ext = model.extension();
    assert_eq!(keys, vec![
        format!("model.pdb.mixture{ext}"),
        format!("model.pdb.pp{ext}"),
        format!("model.pdb.qq{ext}"),
    ]);
    assert_eq!(json["items"][1]["rows"][0][1], "model.pdb");
}

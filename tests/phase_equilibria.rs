use approx::assert_relative_eq;
use quantity::{Pressure, Temperature, BAR, KELVIN, PASCAL};
use std::error::Error;
use std::sync::Arc;
use thermoeq::{
    data, BinaryPhaseDiagram, Cubic, EqError, EquationOfState, EquilibriumOptions,
    HomogeneousMixture, IdealActivity, IdealGas, MultiphaseEquilibrium, Phase, Species,
};

const SPECIES: [Species; 2] = [Species::Benzene, Species::Toluene];

fn atmospheric() -> Pressure {
    101325.0 * PASCAL
}

fn vapor() -> Result<HomogeneousMixture, Box<dyn Error>> {
    let eos: Arc<dyn EquationOfState> = Arc::new(IdealGas::new());
    Ok(HomogeneousMixture::new(
        Phase::Vapor,
        SPECIES.iter().map(|&s| (s, eos.clone())).collect(),
        Arc::new(IdealActivity::new(SPECIES.to_vec())),
    )?)
}

fn liquid() -> Result<HomogeneousMixture, Box<dyn Error>> {
    let mut components = Vec::new();
    for species in SPECIES {
        let eos: Arc<dyn EquationOfState> =
            Arc::new(Cubic::peng_robinson(data::critical_record(species)?));
        components.push((species, eos));
    }
    Ok(HomogeneousMixture::new(
        Phase::Liquid,
        components,
        Arc::new(data::unifac(&SPECIES)?),
    )?)
}

fn benzene_toluene() -> Result<MultiphaseEquilibrium, Box<dyn Error>> {
    Ok(MultiphaseEquilibrium::new(
        vec![vapor()?, liquid()?],
        EquilibriumOptions::default(),
    )?)
}

#[test]
fn vapor_liquid_equilibrium_of_aromatics() -> Result<(), Box<dyn Error>> {
    let search = benzene_toluene()?;
    let t = 365.0 * KELVIN;
    let points = search.find_phase_equilibria(t, atmospheric())?;
    assert!(!points.is_empty());
    for point in &points {
        println!("{point}");
        assert_eq!(point.phases(), vec![Phase::Vapor, Phase::Liquid]);
        let y = point.mole_fraction(Phase::Vapor, Species::Benzene).ok_or("missing")?;
        let x = point.mole_fraction(Phase::Liquid, Species::Benzene).ok_or("missing")?;
        assert!(0.0 < x && x < 1.0 && 0.0 < y && y < 1.0);
        // benzene is the light boiler
        assert!(y > x);
        assert!(x > 0.35 && x < 0.65, "x = {x}");
        assert!(y > 0.55 && y < 0.85, "y = {y}");
        let liquid = point.phase_composition(Phase::Liquid).ok_or("missing")?;
        assert_relative_eq!(liquid[0] + liquid[1], 1.0, max_relative = 1e-14);
        assert_relative_eq!(point.temperature().convert_into(KELVIN), 365.0);
    }
    Ok(())
}

#[test]
fn repeated_searches_are_identical() -> Result<(), Box<dyn Error>> {
    let search = benzene_toluene()?;
    let t = 365.0 * KELVIN;
    let first = search.find_phase_equilibria(t, atmospheric())?;
    let second = search.find_phase_equilibria(t, atmospheric())?;
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.iter().collect::<Vec<_>>(), b.iter().collect::<Vec<_>>());
    }
    Ok(())
}

#[test]
fn scan_can_be_stopped_early() -> Result<(), Box<dyn Error>> {
    let search = benzene_toluene()?;
    let mut scan = search.scan(365.0 * KELVIN, atmospheric())?;
    assert_eq!(scan.remaining(), 100);
    let first = scan.next().ok_or("no equilibrium found")?;
    assert!(scan.remaining() < 100);
    let all = search.find_phase_equilibria(365.0 * KELVIN, atmospheric())?;
    assert_eq!(
        first.iter().collect::<Vec<_>>(),
        all[0].iter().collect::<Vec<_>>()
    );
    Ok(())
}

#[test]
fn no_equilibrium_outside_the_two_phase_region() -> Result<(), Box<dyn Error>> {
    let search = benzene_toluene()?;
    // below the boiling point of benzene and above the one of toluene
    assert!(search.find_phase_equilibria(320.0 * KELVIN, atmospheric())?.is_empty());
    assert!(search.find_phase_equilibria(420.0 * KELVIN, atmospheric())?.is_empty());
    Ok(())
}

#[test]
fn isobaric_phase_diagram() -> Result<(), Box<dyn Error>> {
    let search = benzene_toluene()?;
    let temperatures: Vec<Temperature> =
        [360.0, 365.0, 370.0].iter().map(|&t| t * KELVIN).collect();
    let diagram = BinaryPhaseDiagram::isobaric(&search, &temperatures, atmospheric())?;
    assert!(diagram.len() >= 3);

    // the states keep the order of the temperatures
    let t: Vec<f64> = diagram
        .states
        .iter()
        .map(|s| s.temperature().convert_into(KELVIN))
        .collect();
    assert!(t.windows(2).all(|w| w[0] <= w[1]));

    // benzene is depleted in both phases at higher temperatures
    let x_first = diagram.states[0].mole_fraction(Phase::Liquid, Species::Benzene);
    let x_last = diagram.states[diagram.len() - 1].mole_fraction(Phase::Liquid, Species::Benzene);
    assert!(x_first > x_last);

    let dump = diagram.to_delimited_string(",");
    let mut lines = dump.lines();
    assert_eq!(
        lines.next(),
        Some(concat!(
            "temperature,pressure,",
            "x(vapor, benzene),x(vapor, toluene),",
            "x(liquid, benzene),x(liquid, toluene)"
        ))
    );
    assert_eq!(lines.count(), diagram.len());
    Ok(())
}

#[test]
fn isothermal_phase_diagram() -> Result<(), Box<dyn Error>> {
    let search = benzene_toluene()?;
    let pressures = [0.9 * BAR, 1.0 * BAR, 1.1 * BAR];
    let diagram = BinaryPhaseDiagram::isothermal(&search, 365.0 * KELVIN, &pressures)?;
    assert!(diagram.len() >= 3);
    Ok(())
}

#[test]
fn unsupported_systems() -> Result<(), Box<dyn Error>> {
    let eos: Arc<dyn EquationOfState> = Arc::new(IdealGas::new());
    let species = vec![Species::Benzene, Species::Toluene, Species::NHexane];
    let ternary = HomogeneousMixture::new(
        Phase::Vapor,
        species.iter().map(|&s| (s, eos.clone())).collect(),
        Arc::new(IdealActivity::new(species)),
    )?;
    let search = MultiphaseEquilibrium::new(vec![ternary], EquilibriumOptions::default())?;
    assert!(matches!(
        search.find_phase_equilibria(365.0 * KELVIN, BAR),
        Err(EqError::NotImplemented(_))
    ));

    let single = MultiphaseEquilibrium::new(vec![vapor()?], EquilibriumOptions::default())?;
    assert!(matches!(
        single.find_phase_equilibria(365.0 * KELVIN, BAR),
        Err(EqError::NotImplemented(_))
    ));
    Ok(())
}

use approx::assert_relative_eq;
use quantity::{MolarVolume, BAR, KELVIN, METER, MOL, PASCAL};
use std::error::Error;
use std::sync::Arc;
use thermoeq::slv::{Slv, SlvParameters, SlvRecord};
use thermoeq::{
    data, ConstantsTable, Cubic, EquationOfState, Phase, RootOptions, SolverOptions, Species,
};

fn m3_per_mol() -> MolarVolume {
    METER * METER * METER / MOL
}

#[test]
fn critical_pressure_of_all_species() -> Result<(), Box<dyn Error>> {
    for species in Species::ALL {
        let record = data::critical_record(species)?;
        let eos = Slv::from_critical_record(record)?;
        let p = &eos.parameters;
        let vc = p.critical_volume();
        let pc = eos.pressure(record.critical_temperature(), vc * m3_per_mol());
        assert_relative_eq!(pc.convert_into(PASCAL), record.pc, max_relative = 1e-8);
    }
    Ok(())
}

#[test]
fn three_candidates_below_the_critical_point() -> Result<(), Box<dyn Error>> {
    let eos = Slv::from_critical_record(data::critical_record(Species::Water)?)?;
    let candidates = eos.phase_candidates(300.0 * KELVIN, BAR)?;
    let phases: Vec<Phase> = candidates.iter().map(|&(phase, _)| phase).collect();
    assert_eq!(phases, vec![Phase::Solid, Phase::Liquid, Phase::Vapor]);
    let volumes: Vec<f64> = candidates
        .iter()
        .map(|(_, v)| v.map(|v| v.convert_into(m3_per_mol())).unwrap_or(f64::NAN))
        .collect();
    assert!(volumes[0] < volumes[1] && volumes[1] < volumes[2], "{volumes:?}");

    // only fluid roots compete, the solid candidate stays absent
    let stable = eos.phase_finder(300.0 * KELVIN, BAR, false)?;
    assert_eq!(stable.len(), 3);
    assert_eq!(stable.present(), vec![Phase::Liquid]);
    assert_eq!(stable.get(Phase::Liquid), candidates[1].1);
    Ok(())
}

#[test]
fn stable_phases_of_water() -> Result<(), Box<dyn Error>> {
    let record = data::critical_record(Species::Water)?;
    let slv = Slv::from_critical_record(record)?;
    let pr = Cubic::peng_robinson(record);
    let states = [
        (300.0, 1e5, Phase::Liquid),
        (400.0, 1e5, Phase::Vapor),
        (600.0, 1e7, Phase::Vapor),
        (300.0, 1e7, Phase::Liquid),
        (1000.0, 1e5, Phase::Vapor),
    ];
    for (t, p, phase) in states {
        let slv_phases = slv.phase_finder(t * KELVIN, p * PASCAL, false)?;
        assert_eq!(slv_phases.present(), vec![phase], "SLV at {t} K, {p} Pa");
        let pr_phases = pr.phase_finder(t * KELVIN, p * PASCAL, false)?;
        assert_eq!(pr_phases.present(), vec![phase], "PR at {t} K, {p} Pa");
    }
    Ok(())
}

#[test]
fn vapor_agrees_with_peng_robinson_at_low_pressure() -> Result<(), Box<dyn Error>> {
    let record = data::critical_record(Species::Benzene)?;
    let slv = Slv::from_critical_record(record)?;
    let pr = Cubic::peng_robinson(record);
    let (t, p) = (500.0 * KELVIN, 0.1 * BAR);
    let v_slv = slv.phase_finder(t, p, true)?.get(Phase::Vapor).ok_or("no vapor root")?;
    let v_pr = pr.phase_finder(t, p, true)?.get(Phase::Vapor).ok_or("no vapor root")?;
    assert_relative_eq!(
        v_slv.convert_into(m3_per_mol()),
        v_pr.convert_into(m3_per_mol()),
        max_relative = 2e-3
    );
    Ok(())
}

#[test]
fn custom_shape_parameters() -> Result<(), Box<dyn Error>> {
    let record = data::critical_record(Species::CarbonDioxide)?;
    let options = RootOptions::new().solver(SolverOptions::new().tol(1e-13));
    let parameters = SlvParameters::new(record, SlvRecord::new(0.7, 0.9), options.solver)?;
    let eos = Slv::with_options(Arc::new(parameters), options);
    assert_relative_eq!(eos.parameters.c / eos.parameters.b, 0.7, max_relative = 1e-12);
    assert_relative_eq!(eos.parameters.d / eos.parameters.b, 0.9, max_relative = 1e-12);
    let phases = eos.phase_finder(400.0 * KELVIN, BAR, false)?;
    assert_eq!(phases.present(), vec![Phase::Vapor]);
    Ok(())
}

#[test]
fn constants_from_file() -> Result<(), Box<dyn Error>> {
    let species = [Species::Toluene, Species::Water];
    let table = ConstantsTable::from_json(&species, "parameters/critical.json")?;
    assert_eq!(table.species().collect::<Vec<_>>(), species.to_vec());
    for s in species {
        assert_eq!(table.get(s)?.tc, data::critical_record(s)?.tc);
    }
    Ok(())
}

use crate::cli::ParseArgs;
use crate::error::Result;
use crate::utils::format::scientific;
use crate::utils::input::load_bead_model;
use hydrobead::core::models::bead::{BeadModel, BeadType};

pub fn run(args: ParseArgs) -> Result<()> {
    let model = load_bead_model(&args.source)?;
    print!("{}", format_bead_table(&model));
    Ok(())
}

fn format_bead_table(model: &BeadModel) -> String {
    let mut table = format!(
        "{:>6}  {:<10}  {:>12}  {:>12}\n",
        "bead", "type", "steric [Å]", "hydro [Å]"
    );
    for (index, bead) in model.beads().iter().enumerate() {
        table.push_str(&format!(
            "{:>6}  {:<10}  {:>12.4}  {:>12.4}\n",
            index,
            bead.bead_type().to_string(),
            bead.steric_radius(),
            bead.hydrodynamic_radius()
        ));
    }
    table.push_str(&format!(
        "\n{} bead(s): {} disordered, {} structured\nM = {} [Da]\n",
        model.len(),
        model.count_of(BeadType::Disordered),
        model.count_of(BeadType::Structured),
        scientific(model.total_mass())
    ));
    table
}

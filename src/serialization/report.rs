use std::fmt::Write;

use crate::{
    statement::{Argument, StatementKind},
    theory::Consistency,
    types::*,
    Universe,
};

use super::error::Error;

/// Renders `formula` in plain text.
pub fn render(universe: &Universe, formula: FormulaId) -> String {
    universe.display(formula).to_string()
}

fn write_argument<W: Write>(w: &mut W, universe: &Universe, argument: Argument) -> Result<(), Error> {
    match argument {
        Argument::Statement(statement) => write!(
            w,
            "{}:{}",
            universe.theory(statement.theory)?.symbol(),
            statement.position + 1
        )?,
        Argument::Formula(formula) => write!(w, "{}", universe.display(formula))?,
        Argument::Theory(theory) => write!(w, "{}", universe.theory(theory)?.symbol())?,
    }
    Ok(())
}

/// Writes the statements of `theory` in position order, one per line. Positions are shown
/// starting from 1.
///
/// ```text
/// theory T (undetermined)
/// 1: axiom A: p holds
/// 2: p ⊢ axiom_interpretation(T:1, p)
/// ```
pub fn write_theory<W: Write>(w: &mut W, universe: &Universe, theory: TheoryId) -> Result<(), Error> {
    let t = universe.theory(theory)?;
    let consistency = match t.consistency() {
        Consistency::ProvedConsistent => "consistent",
        Consistency::Undetermined => "undetermined",
        Consistency::ProvedInconsistent => "inconsistent",
    };
    write!(w, "theory {} ({}", t.symbol(), consistency)?;
    if let Some(parent) = t.parent() {
        write!(w, ", extends {}", universe.theory(parent)?.symbol())?;
        if let Some(limit) = t.limit() {
            write!(w, " up to {}", limit + 1)?;
        }
    }
    writeln!(w, ")")?;

    for statement in t.statements() {
        write!(w, "{}: ", statement.position() + 1)?;
        match statement.kind() {
            StatementKind::AxiomInclusion { axiom, locked } => {
                let axiom = universe.axiom(*axiom)?;
                write!(w, "axiom {}: {}", axiom.symbol(), axiom.text())?;
                if *locked {
                    write!(w, " (locked)")?;
                }
            }
            StatementKind::DefinitionInclusion { definition, locked } => {
                let definition = universe.definition(*definition)?;
                write!(w, "definition {}: {}", definition.symbol(), definition.text())?;
                if *locked {
                    write!(w, " (locked)")?;
                }
            }
            StatementKind::Inferred {
                formula,
                rule,
                arguments,
            } => {
                write!(
                    w,
                    "{} ⊢ {}(",
                    universe.display(*formula),
                    universe.rule(*rule)?.name()
                )?;
                for (i, &argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        w.write_str(", ")?;
                    }
                    write_argument(w, universe, argument)?;
                }
                w.write_str(")")?;
            }
            StatementKind::Hypothesis { formula, child } => write!(
                w,
                "hypothesis {} in {}",
                universe.display(*formula),
                universe.theory(*child)?.symbol()
            )?,
            StatementKind::Note { text } => write!(w, "note: {}", text)?,
            StatementKind::Section { title, level } => {
                write!(w, "{} {}", "#".repeat((*level).max(1)), title)?
            }
        }
        writeln!(w)?;
    }
    Ok(())
}

pub fn theory_report(universe: &Universe, theory: TheoryId) -> Result<String, Error> {
    let mut s = String::new();
    write_theory(&mut s, universe, theory)?;
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Builtin, StandardRule};

    #[test]
    fn report() {
        let mut u = Universe::new();
        let t = u.declare_theory("T");
        let p = u.declare_proposition("p");
        let np = u.make_builtin(Builtin::Not, &[p]).unwrap();
        u.open_section(t, "Basics", 1).unwrap();
        let axiom = u.declare_axiom("A", "p holds");
        let inclusion = u.include_axiom(t, axiom).unwrap();
        u.include_standard(t, StandardRule::AxiomInterpretation)
            .unwrap()
            .infer(&mut u, &[inclusion.into(), p.into()])
            .unwrap();
        u.lock_inclusion(inclusion).unwrap();
        let h = u.pose_hypothesis(t, np).unwrap();
        u.take_note(t, "done").unwrap();

        assert_eq!(
            theory_report(&u, t).unwrap(),
            "theory T (undetermined)\n\
             1: # Basics\n\
             2: axiom A: p holds (locked)\n\
             3: p ⊢ axiom_interpretation(T:2, p)\n\
             4: hypothesis ¬(p) in T.1\n\
             5: note: done\n"
        );
        assert_eq!(
            theory_report(&u, h.child).unwrap(),
            "theory T.1 (undetermined, extends T up to 4)\n\
             1: axiom T.1.hypothesis: ¬(p) (locked)\n\
             2: ¬(p) ⊢ axiom_interpretation(T.1:1, ¬(p))\n"
        );
    }

    #[test]
    fn foreign_theories_are_errors() {
        let u = Universe::new();
        let mut other = Universe::new();
        let t = other.declare_theory("T");
        assert!(theory_report(&u, t).is_err());
        assert_eq!(render(&other, other.theory(t).unwrap().object()), "T");
    }
}

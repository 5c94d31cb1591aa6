//! The full normalization pipeline, from the original formula to its clauses.

use crate::{
    ast::Formula,
    transform::{
        classify_horn, extract_clauses, Config, HornReport, TransformResult, Transformer,
    },
};
use indexmap::IndexMap;
use std::time::{Duration, Instant};

/// A named artifact of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Original,
    ImplicationFree,
    NegationPushed,
    DoubleNegationFree,
    Standardized,
    Prenex,
    Skolemized,
    QuantifierFree,
    Cnf,

    /// The matrix of the prenex form, with its quantifiers discarded, in CNF.
    CnfPrenex,

    /// The matrix of the prenex form, with its quantifiers discarded, in DNF.
    DnfPrenex,
}

impl_str_conversion_traits!(Stage {
    Original: "original",
    ImplicationFree: "implication-free",
    NegationPushed: "negation-pushed",
    DoubleNegationFree: "double-negation-free",
    Standardized: "standardized",
    Prenex: "prenex",
    Skolemized: "skolemized",
    QuantifierFree: "quantifier-free",
    Cnf: "cnf",
    CnfPrenex: "cnf-prenex",
    DnfPrenex: "dnf-prenex",
});

impl Stage {
    /// Every stage, in the order the pipeline produces them.
    pub const ALL: [Stage; 11] = [
        Stage::Original,
        Stage::ImplicationFree,
        Stage::NegationPushed,
        Stage::DoubleNegationFree,
        Stage::Standardized,
        Stage::Prenex,
        Stage::Skolemized,
        Stage::QuantifierFree,
        Stage::Cnf,
        Stage::CnfPrenex,
        Stage::DnfPrenex,
    ];
}

/// Every artifact produced by normalizing one formula.
#[derive(Debug, Clone)]
pub struct Normalization {
    artifacts: IndexMap<Stage, Formula>,

    /// The clauses of the CNF.
    pub clauses: Vec<Formula>,

    /// The Horn classification of each clause.
    pub horn: Vec<HornReport>,

    /// How long each stage took, in pipeline order.
    pub timings: Vec<(Stage, Duration)>,
}

impl Normalization {
    /// Returns the formula produced at `stage`.
    pub fn get(&self, stage: Stage) -> Option<&Formula> {
        self.artifacts.get(&stage)
    }

    /// Iterates over every stage and its formula, in pipeline order.
    pub fn stages(&self) -> impl Iterator<Item = (Stage, &Formula)> {
        self.artifacts.iter().map(|(stage, formula)| (*stage, formula))
    }

    pub fn total_time(&self) -> Duration {
        self.timings.iter().map(|(_, time)| *time).sum()
    }
}

/// Collects artifacts and their timings while the pipeline runs.
#[derive(Default)]
struct Recorder {
    artifacts: IndexMap<Stage, Formula>,
    timings: Vec<(Stage, Duration)>,
}

impl Recorder {
    fn stage<F>(&mut self, stage: Stage, pass: F) -> TransformResult<Formula>
    where
        F: FnOnce() -> TransformResult<Formula>,
    {
        let time = Instant::now();
        let result = pass()?;
        self.timings.push((stage, time.elapsed()));
        log::debug!("{}: {}", stage, result);
        self.artifacts.insert(stage, result.clone());
        Ok(result)
    }
}

/// Runs every stage of the pipeline on `formula`.
pub fn run(formula: &Formula, config: Config) -> TransformResult<Normalization> {
    let transformer = Transformer::new(config);
    let mut recorder = Recorder::default();

    let original = recorder.stage(Stage::Original, || Ok(formula.clone()))?;
    let implication_free = recorder.stage(Stage::ImplicationFree, || {
        transformer.eliminate_implication(&original)
    })?;
    let negation_pushed = recorder.stage(Stage::NegationPushed, || {
        transformer.push_negation_inward(&implication_free)
    })?;
    let double_negation_free = recorder.stage(Stage::DoubleNegationFree, || {
        transformer.remove_double_negation(&negation_pushed)
    })?;
    let standardized = recorder.stage(Stage::Standardized, || {
        transformer.standardize_variables(&double_negation_free)
    })?;
    let prenex = recorder.stage(Stage::Prenex, || transformer.hoist_quantifiers(&standardized))?;
    let skolemized = recorder.stage(Stage::Skolemized, || transformer.skolemize(&prenex))?;
    let quantifier_free = recorder.stage(Stage::QuantifierFree, || {
        Ok(transformer.drop_quantifiers(&skolemized))
    })?;
    let cnf = recorder.stage(Stage::Cnf, || transformer.distribute_to_cnf(&quantifier_free))?;
    recorder.stage(Stage::CnfPrenex, || transformer.to_conjunctive_prenex(&prenex))?;
    recorder.stage(Stage::DnfPrenex, || transformer.to_disjunctive_prenex(&prenex))?;

    let clauses = extract_clauses(&cnf);
    let horn = classify_horn(&clauses);
    log::debug!(
        "{} clauses, {} of them Horn",
        clauses.len(),
        horn.iter().filter(|r| r.is_horn()).count()
    );

    let Recorder { artifacts, timings } = recorder;
    Ok(Normalization { artifacts, clauses, horn, timings })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::render, parser::tests::parse_formula};

    #[test]
    fn test_stage_names() {
        for stage in Stage::ALL {
            assert_eq!(Ok(stage), stage.to_string().parse());
        }
        assert_eq!(Err(()), "nnf".parse::<Stage>());
    }

    #[test]
    fn test_every_stage_is_recorded() {
        let formula = parse_formula(r"\forall x (P(x) \iff \exists y Q(x, y))");
        let result = run(&formula, Config::default()).unwrap();
        let stages: Vec<_> = result.stages().map(|(stage, _)| stage).collect();
        assert_eq!(stages, Stage::ALL);
        let timed: Vec<_> = result.timings.iter().map(|(stage, _)| *stage).collect();
        assert_eq!(timed, Stage::ALL);
        assert_eq!(result.get(Stage::Original), Some(&formula));
    }

    #[test]
    fn test_intermediate_stages() {
        let formula = parse_formula(r"\neg \exists x (P(x) \land \neg \neg \forall x Q(x))");
        let result = run(&formula, Config::default()).unwrap();
        let rendered = |stage| result.get(stage).map(render).unwrap();
        assert_eq!(
            rendered(Stage::NegationPushed),
            r"\forall x (\neg P(x) \lor \exists x \neg Q(x))"
        );
        assert_eq!(
            rendered(Stage::Standardized),
            r"\forall x (\neg P(x) \lor \exists x1 \neg Q(x1))"
        );
        assert_eq!(
            rendered(Stage::Prenex),
            r"\forall x \exists x1 (\neg P(x) \lor \neg Q(x1))"
        );
        assert_eq!(rendered(Stage::Skolemized), r"\forall x (\neg P(x) \lor \neg Q(f0(x)))");
        assert_eq!(rendered(Stage::Cnf), r"\neg P(x) \lor \neg Q(f0(x))");
        assert_eq!(result.horn.len(), 1);
        assert_eq!(result.horn[0].kind, crate::transform::HornKind::Query);
    }
}

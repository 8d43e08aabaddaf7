//! Scripted collaborators for driving the refinement loop in tests

#![allow(dead_code)]

use ilpatlas::{
    program_code, Argument, Assignment, BeforeMap, Clause, ConfMatrix, ConstraintGenerator,
    ConstraintKind, Constant, CoverageOracle, Enumerator, EnumeratorError, GroundClause, Literal,
    MinClauseMap, OracleError, Symbol,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Model facts
// =============================================================================

fn slots(vars: &[i64]) -> Symbol {
    Symbol::tuple(vars.iter().map(|&v| Symbol::from(v)).collect())
}

fn literal_fact(tag: &str, clause_id: i64, predicate: &str, vars: &[i64]) -> Symbol {
    Symbol::function(
        tag,
        vec![
            Symbol::from(clause_id),
            Symbol::atom(predicate),
            Symbol::from(vars.len() as i64),
            slots(vars),
        ],
    )
}

/// Facts of one clause: `head(vars) :- body...`
pub fn clause_facts(clause_id: i64, head: (&str, &[i64]), body: &[(&str, &[i64])]) -> Vec<Symbol> {
    let mut facts = vec![literal_fact("head_literal", clause_id, head.0, head.1)];
    for (predicate, vars) in body {
        facts.push(literal_fact("body_literal", clause_id, predicate, vars));
    }
    facts
}

/// `direction` facts for every argument of a predicate, modes given as `in` / `out`
pub fn direction_facts(predicate: &str, modes: &[&str]) -> Vec<Symbol> {
    modes
        .iter()
        .enumerate()
        .map(|(i, mode)| {
            Symbol::function(
                "direction",
                vec![Symbol::atom(predicate), Symbol::from(i as i64), Symbol::atom(*mode)],
            )
        })
        .collect()
}

/// Single-clause model `head(A) :- body(A)` for each body predicate
pub fn unary_model(head: &str, body: &[&str]) -> Vec<Symbol> {
    const FIRST: &[i64] = &[0];
    let body: Vec<(&str, &[i64])> = body.iter().map(|p| (*p, FIRST)).collect();
    clause_facts(0, (head, FIRST), &body)
}

// =============================================================================
// Enumerator
// =============================================================================

#[derive(Debug, Default)]
pub struct EnumeratorLog {
    pub sizes: Vec<usize>,
    pub binding_requests: Vec<Clause>,
    pub added: Vec<GroundClause>,
}

/// Enumerator call that fails with `EnumeratorError::Failed`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    /// Entering this literal budget
    Budget(usize),
    /// Asking for a model at this literal budget
    Model(usize),
    Bindings,
    AddGround,
}

/// Replays a fixed list of models per literal budget
pub struct ScriptedEnumerator {
    models: HashMap<usize, VecDeque<Vec<Symbol>>>,
    fail_at: Option<FailAt>,
    pub log: Arc<Mutex<EnumeratorLog>>,
}

impl ScriptedEnumerator {
    pub fn new() -> Self {
        ScriptedEnumerator {
            models: HashMap::new(),
            fail_at: None,
            log: Arc::new(Mutex::new(EnumeratorLog::default())),
        }
    }

    pub fn with_model(mut self, size: usize, model: Vec<Symbol>) -> Self {
        self.models.entry(size).or_default().push_back(model);
        self
    }

    pub fn failing_at(mut self, fail_at: FailAt) -> Self {
        self.fail_at = Some(fail_at);
        self
    }

    fn check(&self, call: FailAt) -> Result<(), EnumeratorError> {
        if self.fail_at == Some(call) {
            Err(EnumeratorError::Failed(format!("{:?}", call)))
        } else {
            Ok(())
        }
    }
}

impl Enumerator for ScriptedEnumerator {
    fn update_number_of_literals(&mut self, size: usize) -> Result<(), EnumeratorError> {
        self.check(FailAt::Budget(size))?;
        self.log.lock().unwrap().sizes.push(size);
        Ok(())
    }

    fn get_model(&mut self, size: usize) -> Result<Option<Vec<Symbol>>, EnumeratorError> {
        self.check(FailAt::Model(size))?;
        Ok(self.models.get_mut(&size).and_then(VecDeque::pop_front))
    }

    /// Two assignments: every variable to 0, every variable to 1
    fn find_bindings(
        &mut self,
        clause: &Clause,
        _max_clauses: usize,
        _max_vars: usize,
    ) -> Result<Vec<Assignment>, EnumeratorError> {
        self.check(FailAt::Bindings)?;
        self.log.lock().unwrap().binding_requests.push(clause.clone());
        let vars = clause.all_vars();
        Ok((0..2)
            .map(|value| {
                vars.iter()
                    .map(|v| (v.clone(), Constant::Int(value)))
                    .collect()
            })
            .collect())
    }

    fn add_ground_clauses(&mut self, clauses: Vec<GroundClause>) -> Result<(), EnumeratorError> {
        self.check(FailAt::AddGround)?;
        self.log.lock().unwrap().added.extend(clauses);
        Ok(())
    }
}

/// Never runs out of the same model
pub struct EndlessEnumerator(pub Vec<Symbol>);

impl Enumerator for EndlessEnumerator {
    fn update_number_of_literals(&mut self, _size: usize) -> Result<(), EnumeratorError> {
        Ok(())
    }

    fn get_model(&mut self, _size: usize) -> Result<Option<Vec<Symbol>>, EnumeratorError> {
        Ok(Some(self.0.clone()))
    }

    fn find_bindings(
        &mut self,
        _clause: &Clause,
        _max_clauses: usize,
        _max_vars: usize,
    ) -> Result<Vec<Assignment>, EnumeratorError> {
        Ok(vec![Assignment::new()])
    }

    fn add_ground_clauses(&mut self, _clauses: Vec<GroundClause>) -> Result<(), EnumeratorError> {
        Ok(())
    }
}

// =============================================================================
// Oracle
// =============================================================================

/// Answers `test` from a table keyed by program code
pub struct ScriptedOracle {
    results: HashMap<String, Result<ConfMatrix, OracleError>>,
    /// Answer for programs missing from the table
    fallback: ConfMatrix,
    delay: Duration,
    pub tested: Arc<Mutex<Vec<String>>>,
}

impl ScriptedOracle {
    pub fn new() -> Self {
        ScriptedOracle {
            results: HashMap::new(),
            fallback: ConfMatrix::new(0, 1, 1, 0),
            delay: Duration::ZERO,
            tested: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_result(mut self, code: &str, conf_matrix: (usize, usize, usize, usize)) -> Self {
        self.results.insert(code.to_string(), Ok(conf_matrix.into()));
        self
    }

    pub fn with_error(mut self, code: &str, error: OracleError) -> Self {
        self.results.insert(code.to_string(), Err(error));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl CoverageOracle for ScriptedOracle {
    fn test(&mut self, program: &[Clause]) -> Result<ConfMatrix, OracleError> {
        let code = program_code(program);
        self.tested.lock().unwrap().push(code.clone());
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        self.results.get(&code).cloned().unwrap_or(Ok(self.fallback))
    }

    fn is_inconsistent(&mut self, _clause: &Clause) -> Result<bool, OracleError> {
        Ok(false)
    }

    fn is_totally_incomplete(&mut self, _clause: &Clause) -> Result<bool, OracleError> {
        Ok(false)
    }

    fn is_non_functional(&mut self, _program: &[Clause]) -> Result<bool, OracleError> {
        Ok(false)
    }

    fn check_redundant_literal(&mut self, _program: &[Clause]) -> Result<Vec<Clause>, OracleError> {
        Ok(Vec::new())
    }

    fn check_redundant_clause(&mut self, _program: &[Clause]) -> Result<bool, OracleError> {
        Ok(false)
    }
}

// =============================================================================
// Constraint generator
// =============================================================================

/// Emits one constraint per call: `:- <family>(P), size(n)`, with `size`
/// a meta literal holding the number of clauses constrained
#[derive(Default)]
pub struct RecordingGenerator {
    pub calls: Arc<Mutex<Vec<(ConstraintKind, Vec<String>)>>>,
}

impl RecordingGenerator {
    fn emit(&mut self, kind: ConstraintKind, program: &[Clause]) -> Vec<Clause> {
        let codes = program.iter().map(Clause::code).collect();
        self.calls.lock().unwrap().push((kind, codes));
        vec![Clause::constraint([
            Literal::new(kind.to_string(), vec![Argument::var("P", "Clause")]),
            Literal::meta("size", vec![Argument::int(program.len() as i64)]),
        ])]
    }
}

impl ConstraintGenerator for RecordingGenerator {
    fn generalisation_constraint(
        &mut self,
        program: &[Clause],
        _before: &BeforeMap,
        _min_clause: &MinClauseMap,
    ) -> Vec<Clause> {
        self.emit(ConstraintKind::Generalisation, program)
    }

    fn specialisation_constraint(
        &mut self,
        program: &[Clause],
        _before: &BeforeMap,
        _min_clause: &MinClauseMap,
    ) -> Vec<Clause> {
        self.emit(ConstraintKind::Specialisation, program)
    }

    fn redundancy_constraint(
        &mut self,
        program: &[Clause],
        _before: &BeforeMap,
        _min_clause: &MinClauseMap,
    ) -> Vec<Clause> {
        self.emit(ConstraintKind::Redundancy, program)
    }

    fn banish_constraint(
        &mut self,
        program: &[Clause],
        _before: &BeforeMap,
        _min_clause: &MinClauseMap,
    ) -> Vec<Clause> {
        self.emit(ConstraintKind::Banish, program)
    }

    fn redundant_literal_constraint(
        &mut self,
        clause: &Clause,
        _before: &BeforeMap,
        _min_clause: &MinClauseMap,
    ) -> Vec<Clause> {
        vec![Clause::constraint([Literal::new(
            "redundant_literal",
            vec![Argument::symbol(clause.code())],
        )])]
    }
}

/// Emits the same clauses for a family on every call
#[derive(Default)]
pub struct FixedGenerator {
    clauses: HashMap<ConstraintKind, Vec<Clause>>,
}

impl FixedGenerator {
    pub fn with(mut self, kind: ConstraintKind, clause: &str) -> Self {
        self.clauses
            .entry(kind)
            .or_default()
            .push(Clause::parse(clause).unwrap());
        self
    }

    fn emit(&self, kind: ConstraintKind) -> Vec<Clause> {
        self.clauses.get(&kind).cloned().unwrap_or_default()
    }
}

impl ConstraintGenerator for FixedGenerator {
    fn generalisation_constraint(
        &mut self,
        _program: &[Clause],
        _before: &BeforeMap,
        _min_clause: &MinClauseMap,
    ) -> Vec<Clause> {
        self.emit(ConstraintKind::Generalisation)
    }

    fn specialisation_constraint(
        &mut self,
        _program: &[Clause],
        _before: &BeforeMap,
        _min_clause: &MinClauseMap,
    ) -> Vec<Clause> {
        self.emit(ConstraintKind::Specialisation)
    }

    fn redundancy_constraint(
        &mut self,
        _program: &[Clause],
        _before: &BeforeMap,
        _min_clause: &MinClauseMap,
    ) -> Vec<Clause> {
        self.emit(ConstraintKind::Redundancy)
    }

    fn banish_constraint(
        &mut self,
        _program: &[Clause],
        _before: &BeforeMap,
        _min_clause: &MinClauseMap,
    ) -> Vec<Clause> {
        self.emit(ConstraintKind::Banish)
    }

    fn redundant_literal_constraint(
        &mut self,
        _clause: &Clause,
        _before: &BeforeMap,
        _min_clause: &MinClauseMap,
    ) -> Vec<Clause> {
        Vec::new()
    }
}

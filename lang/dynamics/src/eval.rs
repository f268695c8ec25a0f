use crate::{err::*, exn::*, param::ParamManager, store::EvarStore, syntax::*, unify::*};
use mtac_term::{FreeVars, Oracle, Substitution, construct};
use std::rc::Rc;

pub trait Eval<'rt>: Sized {
    type Out;
    fn step<'e>(self, runtime: &'e mut Runtime<'rt>) -> Step<Self, Self::Out>;
    fn eval<'e>(self, runtime: &'e mut Runtime<'rt>) -> Self::Out {
        let mut res = self;
        loop {
            match res.step(runtime) {
                | Step::Done(out) => break out,
                | Step::Step(next) => res = next,
            }
        }
    }
}

pub enum Step<T, Out> {
    Done(Out),
    Step(T),
}

/// Drives one computation to a value or a failure.
///
/// The evar store and the parameter extents belong to the runtime and are
/// dropped with it; nothing is shared between runs.
pub struct Runtime<'rt> {
    pub oracle: &'rt dyn Oracle,
    pub exns: &'rt ExnRegistry,
    pub evars: EvarStore,
    pub params: ParamManager,
    pub stack: im::Vector<Frame>,
    /// log every machine step at trace level
    pub trace_steps: bool,
    steps: usize,
}

impl<'rt> Runtime<'rt> {
    pub fn new(oracle: &'rt dyn Oracle, exns: &'rt ExnRegistry) -> Self {
        Runtime {
            oracle,
            exns,
            evars: EvarStore::new(),
            params: ParamManager::new(),
            stack: im::Vector::new(),
            trace_steps: false,
            steps: 0,
        }
    }
    pub fn trace_steps(mut self, trace: bool) -> Self {
        self.trace_steps = trace;
        self
    }
    /// Execute `compu`. Diverges if the computation does.
    pub fn run(mut self, compu: Computation) -> Result<RcTerm> {
        let res = State::Compute(compu).eval(&mut self);
        log::debug!("run finished after {} steps", self.steps);
        res
    }
    /// Number of machine steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn zonk(&self, term: &RcTerm) -> RcTerm {
        self.evars.zonk(term)
    }

    fn normalize(&self, term: &RcTerm, policy: Policy) -> RcTerm {
        let term = self.zonk(term);
        match policy {
            | Policy::NoReduction => term,
            | Policy::Simplify => self.oracle.normalize(&term),
            | Policy::WeakHead => self.oracle.whnf(&term),
            | Policy::OneStep => self.oracle.step(&term).unwrap_or(term),
        }
    }

    fn declared(&self, exn: &Exception) -> Result<()> {
        let Some(decl) = self.exns.get(exn.tag) else {
            return Err(Failure::UndeclaredException(exn.tag));
        };
        let (expected, found) = (decl.arg.is_some() as usize, exn.arg.is_some() as usize);
        if expected != found {
            Err(Failure::ArityMismatch { expected, found })?
        }
        Ok(())
    }

    fn commit(&mut self, evars: Vec<(EvarId, RcTerm)>) -> Result<()> {
        for (evar, value) in evars {
            self.evars.instantiate(evar, value)?;
        }
        Ok(())
    }

    fn catch(&self, arm: &Catcher, exn: &Exception) -> Option<Unified> {
        let unifier = Unifier::new(self.oracle, &self.evars, &arm.vars);
        match &arm.pattern {
            | ExnPattern::Any => unifier.finish(),
            | ExnPattern::Tag { tag, arg } => {
                if *tag != exn.tag {
                    return None;
                }
                match (arg, &exn.arg) {
                    | (None, None) => unifier.finish(),
                    | (Some(pattern), Some(arg)) => unifier.unify(pattern, arg),
                    | _ => None,
                }
            }
        }
    }

    /// A value reached the outermost frame.
    fn finish(&self, value: RcTerm) -> Result<RcTerm> {
        let value = self.zonk(&value);
        if let Some(evar) = value.evars().iter().min() {
            Err(Failure::UninstantiatedRequiredEvar(*evar))?
        }
        if let Some(param) = value.params().iter().min() {
            Err(Failure::ScopeEscape(*param))?
        }
        Ok(value)
    }

    fn compute(&mut self, compu: Computation) -> Result<State> {
        let state = match compu {
            | Computation::Ret(Ret(term, policy)) => State::Return(self.normalize(&term, policy)),
            | Computation::Bind(Bind { bindee, tail }) => {
                self.stack.push_back(Frame::Kont(tail));
                State::Compute(bindee.as_ref().clone())
            }
            | Computation::Raise(Raise(exn)) => {
                self.declared(&exn)?;
                let arg = exn.arg.as_ref().map(|arg| self.zonk(arg));
                State::Unwind(Exception { arg, ..exn })
            }
            | Computation::TryWith(TryWith { body, arms }) => {
                for arm in &arms {
                    if let ExnPattern::Tag { tag, .. } = &arm.pattern {
                        if !self.exns.contains(*tag) {
                            Err(Failure::UndeclaredException(*tag))?
                        }
                    }
                }
                self.stack.push_back(Frame::Catch(arms));
                State::Compute(body.as_ref().clone())
            }
            | Computation::Fix(Fix(fix, args)) => {
                if args.len() != fix.arity {
                    Err(Failure::ArityMismatch { expected: fix.arity, found: args.len() })?
                }
                State::Compute((fix.body.0)(&fix, &args))
            }
            | Computation::Match(Match { scrut, arms }) => {
                let scrut = self.zonk(&scrut);
                let selected = arms.iter().enumerate().find_map(|(i, clause)| {
                    let unifier = Unifier::new(self.oracle, &self.evars, &clause.vars);
                    Some((i, clause, unifier.unify(&clause.pattern, &scrut)?))
                });
                let Some((i, clause, unified)) = selected else {
                    return Err(Failure::NoMatchingPattern(scrut));
                };
                log::debug!("clause #{} matches {}", i, scrut);
                self.commit(unified.evars)?;
                State::Compute((clause.handler.0)(&unified.subst))
            }
            | Computation::Nu(Nu { name, ty, body }) => {
                let ty = self.zonk(&ty);
                let param = self.params.open(name, ty);
                self.stack.push_back(Frame::Scope(param));
                State::Compute((body.0)(construct::param(param)))
            }
            | Computation::Abs(AbsParam { kind, param, body }) => {
                let target = self.zonk(&param);
                let Some(param) = target.as_param() else {
                    return Err(Failure::NotAParameter(target));
                };
                let decl = self.params.lookup(param)?;
                let binder = Binder { name: decl.name.clone(), ty: self.zonk(&decl.ty) };
                let body = self.zonk(&body).abstract_param(param);
                let term: Term = match kind {
                    | AbsKind::Fun => Abs(binder, body).into(),
                    | AbsKind::Prod => Prod(binder, body).into(),
                };
                State::Return(Rc::new(term))
            }
            | Computation::EvarAlloc(EvarAlloc(ty)) => {
                let ty = self.zonk(&ty);
                let evar = self.evars.alloc(ty);
                State::Return(construct::evar(evar))
            }
            | Computation::IsEvar(IsEvar(term)) => {
                let term = self.zonk(&term);
                State::Return(construct::boolean(term.as_evar().is_some()))
            }
            | Computation::Instantiate(Instantiate { evar, value }) => {
                let Some(target) = evar.as_evar() else {
                    return Err(Failure::NotAnEvar(self.zonk(&evar)));
                };
                self.evars.instantiate(target, value.clone())?;
                State::Return(self.zonk(&value))
            }
            | Computation::Print(Print(term)) => {
                let term = self.zonk(&term);
                log::info!("{}", term);
                State::Return(term)
            }
        };
        Ok(state)
    }

    fn ret(&mut self, value: RcTerm) -> Result<Step<State, RcTerm>> {
        let state = match self.stack.pop_back() {
            | None => return self.finish(value).map(Step::Done),
            | Some(Frame::Kont(kont)) => State::Compute((kont.0)(value)),
            | Some(Frame::Scope(param)) => {
                let value = self.zonk(&value);
                if value.occurs_param(param) {
                    Err(Failure::ScopeEscape(param))?
                }
                self.params.close(param);
                State::Return(value)
            }
            | Some(Frame::Catch(_)) => State::Return(value),
        };
        Ok(Step::Step(state))
    }

    fn unwind(&mut self, exn: Exception) -> Result<Step<State, RcTerm>> {
        let state = match self.stack.pop_back() {
            | None => Err(Failure::Uncaught(exn))?,
            | Some(Frame::Kont(_)) => State::Unwind(exn),
            | Some(Frame::Scope(param)) => {
                let arg = exn.arg.as_ref().map(|arg| self.zonk(arg));
                if arg.as_ref().is_some_and(|arg| arg.occurs_param(param)) {
                    Err(Failure::ScopeEscape(param))?
                }
                self.params.close(param);
                State::Unwind(Exception { arg, ..exn })
            }
            | Some(Frame::Catch(arms)) => {
                let caught = arms
                    .iter()
                    .enumerate()
                    .find_map(|(i, arm)| Some((i, arm, self.catch(arm, &exn)?)));
                match caught {
                    | Some((i, arm, unified)) => {
                        log::debug!("handler #{} catches {}", i, exn);
                        self.commit(unified.evars)?;
                        State::Compute((arm.handler.0)(&exn, &unified.subst))
                    }
                    | None => State::Unwind(exn),
                }
            }
        };
        Ok(Step::Step(state))
    }
}

impl<'rt> Eval<'rt> for State {
    type Out = Result<RcTerm>;

    fn step<'e>(self, runtime: &'e mut Runtime<'rt>) -> Step<Self, Self::Out> {
        runtime.steps += 1;
        if runtime.trace_steps {
            log::trace!("[{}] {}", runtime.steps, self);
        }
        let res = match self {
            | State::Compute(compu) => runtime.compute(compu).map(Step::Step),
            | State::Return(value) => runtime.ret(value),
            | State::Unwind(exn) => runtime.unwind(exn),
        };
        match res {
            | Ok(Step::Step(next)) => Step::Step(next),
            | Ok(Step::Done(value)) => Step::Done(Ok(value)),
            | Err(failure) => {
                log::debug!("run failed: {}", failure);
                Step::Done(Err(failure))
            }
        }
    }
}

//! Interned identifiers.
//!
//! A [`Symbol`] is only meaningful inside the [`SymbolTable`] of the program
//! that created it. Two symbols compare equal only if they are the same entry
//! of the same table, so comparing identifiers is an integer compare and a
//! symbol leaking across programs never silently matches a local name.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use rustc_hash::FxHashMap;

/// Identity of one program (and therefore one arena and one symbol table).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct ProgramId(u32);

impl ProgramId {
    /// Allocate a process-unique id.
    pub fn fresh() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        ProgramId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// An interned identifier.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    index: u32,
    program: ProgramId,
}

impl Symbol {
    #[inline]
    pub const fn index(self) -> usize {
        self.index as usize
    }

    /// Program whose table owns this symbol.
    #[inline]
    pub const fn program(self) -> ProgramId {
        self.program
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({}@{})", self.index, self.program.0)
    }
}

/// Per-program identifier table.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    program: ProgramId,
    by_name: FxHashMap<Box<str>, Symbol>,
    names: Vec<Box<str>>,
}

impl SymbolTable {
    pub fn new(program: ProgramId) -> Self {
        SymbolTable {
            program,
            by_name: FxHashMap::default(),
            names: Vec::new(),
        }
    }

    pub fn program(&self) -> ProgramId {
        self.program
    }

    /// Intern `name`, creating a symbol on first use.
    pub fn register(&mut self, name: &str) -> Symbol {
        if let Some(&symbol) = self.by_name.get(name) {
            return symbol;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "more than u32::MAX distinct identifiers is not supported"
        )]
        let symbol = Symbol {
            index: self.names.len() as u32,
            program: self.program,
        };
        self.names.push(name.into());
        self.by_name.insert(name.into(), symbol);
        symbol
    }

    /// Look up `name` without creating it.
    pub fn get(&self, name: &str) -> Option<Symbol> {
        self.by_name.get(name).copied()
    }

    /// Spelling of `symbol`, or `None` if it belongs to another program.
    pub fn name(&self, symbol: Symbol) -> Option<&str> {
        if symbol.program != self.program {
            return None;
        }
        self.names.get(symbol.index()).map(AsRef::as_ref)
    }

    /// Spelling of `symbol` for display.
    ///
    /// Foreign symbols render as `$<index>` so that printing a tree with a
    /// stale reference produces visible garbage instead of a wrong name.
    pub fn name_for(&self, symbol: Symbol) -> std::borrow::Cow<'_, str> {
        match self.name(symbol) {
            Some(name) => std::borrow::Cow::Borrowed(name),
            None => std::borrow::Cow::Owned(format!("${}", symbol.index)),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// All symbols in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, &str)> {
        let program = self.program;
        self.names.iter().enumerate().map(move |(i, name)| {
            #[allow(clippy::cast_possible_truncation, reason = "bounded by register")]
            let symbol = Symbol {
                index: i as u32,
                program,
            };
            (symbol, name.as_ref())
        })
    }
}

#[cfg(test)]
mod tests;

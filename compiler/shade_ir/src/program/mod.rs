//! Programs: arena + symbols + the root module.
//!
//! A [`ProgramBuilder`] is mutable and grows monotonically while a parse
//! runs. [`ProgramBuilder::build`] freezes it into a [`Program`], which is
//! what callers receive whether or not the parse succeeded.

use std::ops::Index;

use crate::arena::{ArenaList, ArenaNode, AstArena};
use crate::ast::{Alias, Function, GlobalDecl, Struct, Variable};
use crate::{ProgramId, Symbol, SymbolTable};

/// Ordered global declarations, in source order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Module {
    globals: Vec<GlobalDecl>,
}

impl Module {
    pub fn globals(&self) -> &[GlobalDecl] {
        &self.globals
    }

    pub fn push(&mut self, decl: GlobalDecl) {
        self.globals.push(decl);
    }

    pub fn is_empty(&self) -> bool {
        self.globals.is_empty()
    }
}

/// Mutable program under construction.
#[derive(Debug)]
pub struct ProgramBuilder {
    id: ProgramId,
    arena: AstArena,
    symbols: SymbolTable,
    module: Module,
}

impl Default for ProgramBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgramBuilder {
    pub fn new() -> Self {
        Self::with_arena(AstArena::new())
    }

    /// Builder with node tables pre-sized for `source_len` bytes of input.
    pub fn with_capacity(source_len: usize) -> Self {
        Self::with_arena(AstArena::with_capacity(source_len))
    }

    fn with_arena(arena: AstArena) -> Self {
        let id = ProgramId::fresh();
        ProgramBuilder {
            id,
            arena,
            symbols: SymbolTable::new(id),
            module: Module::default(),
        }
    }

    pub fn id(&self) -> ProgramId {
        self.id
    }

    /// Allocate a node into this program's arena.
    #[inline]
    pub fn create<N: ArenaNode>(&mut self, node: N) -> N::Id {
        self.arena.alloc(node)
    }

    /// Allocate a list of child handles into this program's arena.
    #[inline]
    pub fn create_list<T: ArenaList>(&mut self, items: impl IntoIterator<Item = T>) -> T::Range {
        self.arena.alloc_list(items)
    }

    pub fn arena(&self) -> &AstArena {
        &self.arena
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    /// Shorthand for `symbols_mut().register(name)`.
    pub fn sym(&mut self, name: &str) -> Symbol {
        self.symbols.register(name)
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    /// Append a committed global declaration.
    pub fn add_global(&mut self, decl: GlobalDecl) {
        self.module.push(decl);
    }

    pub fn build(self) -> Program {
        Program {
            id: self.id,
            arena: self.arena,
            symbols: self.symbols,
            module: self.module,
        }
    }
}

impl<I> Index<I> for ProgramBuilder
where
    AstArena: Index<I>,
{
    type Output = <AstArena as Index<I>>::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        &self.arena[index]
    }
}

/// A finished parse result.
#[derive(Debug)]
pub struct Program {
    id: ProgramId,
    arena: AstArena,
    symbols: SymbolTable,
    module: Module,
}

impl Program {
    pub fn id(&self) -> ProgramId {
        self.id
    }

    pub fn arena(&self) -> &AstArena {
        &self.arena
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn globals(&self) -> &[GlobalDecl] {
        self.module.globals()
    }

    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.module.globals.iter().filter_map(|decl| match *decl {
            GlobalDecl::Function(id) => Some(&self.arena[id]),
            _ => None,
        })
    }

    pub fn global_variables(&self) -> impl Iterator<Item = &Variable> {
        self.module.globals.iter().filter_map(|decl| match *decl {
            GlobalDecl::Variable(id) => Some(&self.arena[id]),
            _ => None,
        })
    }

    pub fn structs(&self) -> impl Iterator<Item = &Struct> {
        self.module.globals.iter().filter_map(|decl| match *decl {
            GlobalDecl::Struct(id) => Some(&self.arena[id]),
            _ => None,
        })
    }

    pub fn aliases(&self) -> impl Iterator<Item = &Alias> {
        self.module.globals.iter().filter_map(|decl| match *decl {
            GlobalDecl::Alias(id) => Some(&self.arena[id]),
            _ => None,
        })
    }

    /// Find a function by name.
    pub fn function(&self, name: &str) -> Option<&Function> {
        let symbol = self.symbols.get(name)?;
        self.functions().find(|f| f.name == symbol)
    }

    /// Spelling of a symbol owned by this program.
    pub fn name_for(&self, symbol: Symbol) -> std::borrow::Cow<'_, str> {
        self.symbols.name_for(symbol)
    }
}

impl<I> Index<I> for Program
where
    AstArena: Index<I>,
{
    type Output = <AstArena as Index<I>>::Output;

    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        &self.arena[index]
    }
}

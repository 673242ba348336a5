//! Module-scope declarations: variables, `let` constants, type aliases,
//! structs, and functions.

use shade_ir::{
    Alias, AliasId, DecorationKind, DecorationRange, Function, FunctionId, Location, MemberRange,
    Range, StorageClass, Struct, StructId, StructMember, Symbol, Type, TypeId, TypeKind, Variable,
    VariableId, VariableKind, VariableRange,
};
use shade_lexer::TokenKind;
use smallvec::SmallVec;
use tracing::trace;

use crate::cursor::Ident;
use crate::grammar::Attrs;
use crate::outcome::{committed, require, try_match, Errored, Expect, Maybe};
use crate::Parser;

/// `var<class> name : T` before any initializer.
pub(crate) struct VarDecl {
    pub name: Symbol,
    pub range: Range,
    pub class: Option<StorageClass>,
    pub ty: Option<TypeId>,
}

/// Everything of a function up to its body.
struct FunctionHeader {
    begin: Location,
    name: Symbol,
    params: VariableRange,
    return_type: TypeId,
    return_decorations: DecorationRange,
}

impl<'src> Parser<'src> {
    /// `var<class>? name (: T)? (= const_expr)?`
    pub(crate) fn global_variable_decl(&mut self, attrs: &mut Attrs) -> Maybe<VariableId> {
        let Some(decl) = try_match!(self.variable_decl()) else {
            return Maybe::NoMatch;
        };
        let initializer = match self.eat(TokenKind::Equal) {
            Some(_) => Some(committed!(self.expect_const_expr())),
            None => None,
        };
        let decorations = self.attach_attrs(attrs);
        Maybe::Matched(self.builder.create(Variable {
            name: decl.name,
            kind: VariableKind::Var(decl.class),
            ty: decl.ty,
            initializer,
            decorations,
            range: decl.range,
        }))
    }

    /// `let name (: T)? (= const_expr)?`, or the deprecated `const` spelling.
    pub(crate) fn global_constant_decl(&mut self, attrs: &mut Attrs) -> Maybe<VariableId> {
        if !self.eat_let() {
            return Maybe::NoMatch;
        }
        let (ident, ty) = committed!(self.expect_optionally_typed_ident("let declaration"));
        let initializer = match self.eat(TokenKind::Equal) {
            Some(_) => Some(committed!(self.expect_const_expr())),
            None => None,
        };
        let decorations = self.attach_attrs(attrs);
        let name = self.builder.sym(ident.text);
        Maybe::Matched(self.builder.create(Variable {
            name,
            kind: VariableKind::Let,
            ty,
            initializer,
            decorations,
            range: ident.range,
        }))
    }

    /// Consume `let`, or `const` with a deprecation warning.
    pub(crate) fn eat_let(&mut self) -> bool {
        if self.eat(TokenKind::Let).is_some() {
            return true;
        }
        match self.eat(TokenKind::Const) {
            Some(range) => {
                self.deprecated(range, "use 'let' instead of 'const'");
                true
            }
            None => false,
        }
    }

    /// `var` with its optional storage class, name, and type.
    pub(crate) fn variable_decl(&mut self) -> Maybe<VarDecl> {
        const USE: &str = "variable declaration";

        if self.eat(TokenKind::Var).is_none() {
            return Maybe::NoMatch;
        }

        let mut class = None;
        if self.peek_is(TokenKind::LessThan) {
            let (storage, range) =
                committed!(self.expect_lt_gt_block(USE, |p| p.expect_storage_class(USE)));
            match storage {
                StorageClass::Input => self.deprecated(
                    range,
                    "use an entry point parameter instead of a variable in the `in` storage class",
                ),
                StorageClass::Output => self.deprecated(
                    range,
                    "use an entry point return value instead of a variable in the `out` storage class",
                ),
                _ => {}
            }
            class = Some(storage);
        }

        let (ident, ty) = committed!(self.expect_optionally_typed_ident(USE));
        Maybe::Matched(VarDecl {
            name: self.builder.sym(ident.text),
            range: ident.range,
            class,
            ty,
        })
    }

    /// `name : T`, where the type is required.
    pub(crate) fn expect_typed_ident(&mut self, use_: &str) -> Expect<(Ident<'src>, TypeId)> {
        let ident = self.expect_ident(use_)?;
        self.expect(use_, TokenKind::Colon)?;
        let ty = self.expect_type_annotation(use_, ident.range)?;
        Ok((ident, ty))
    }

    /// `name` or `name : T`.
    pub(crate) fn expect_optionally_typed_ident(
        &mut self,
        use_: &str,
    ) -> Expect<(Ident<'src>, Option<TypeId>)> {
        let ident = self.expect_ident(use_)?;
        if self.eat(TokenKind::Colon).is_none() {
            return Ok((ident, None));
        }
        let ty = self.expect_type_annotation(use_, ident.range)?;
        Ok((ident, Some(ty)))
    }

    /// The type after `:`, with any attributes written in front of it.
    ///
    /// `@access` attributes wrap the type; an `array` takes the rest. Any
    /// other leftover attribute is an error.
    fn expect_type_annotation(&mut self, use_: &str, name_range: Range) -> Expect<TypeId> {
        let mut attrs = Attrs::new();
        self.attribute_list(&mut attrs)?;
        let access = self.take_attrs(&mut attrs, |kind| matches!(kind, DecorationKind::Access(_)));

        let at = self.peek_range();
        let ty = match self.type_decl_with_attrs(&mut attrs) {
            Maybe::Matched(ty) => ty,
            Maybe::Errored => return Err(Errored),
            Maybe::NoMatch => return Err(self.add_error(at, format!("invalid type for {use_}"))),
        };
        self.expect_attrs_consumed(&attrs)?;

        if access.len() > 1 {
            return Err(self.add_error(name_range, "multiple access attributes not allowed"));
        }
        let Some(&id) = access.first() else {
            return Ok(ty);
        };
        let range = self.builder[id].range;
        let kind = self.builder[id].kind.clone();
        match kind {
            DecorationKind::Access(access) => Ok(self
                .builder
                .create(Type::new(TypeKind::Access { access, ty }, range))),
            _ => Ok(ty),
        }
    }

    /// `type Name = T`. The name is usable as a type from here on.
    pub(crate) fn type_alias(&mut self) -> Maybe<AliasId> {
        const USE: &str = "type alias";

        let Some(keyword) = self.eat(TokenKind::Type) else {
            return Maybe::NoMatch;
        };
        let name = committed!(self.expect_ident(USE));
        committed!(self.expect(USE, TokenKind::Equal));
        let ty = require!(self, self.type_decl(), "invalid type alias");

        let name = self.builder.sym(name.text);
        self.register_constructed(name);
        let range = self.range_from(keyword.begin);
        Maybe::Matched(self.builder.create(Alias { name, ty, range }))
    }

    /// `struct Name { members }`. The caller registers the name once the
    /// trailing `;` is seen.
    pub(crate) fn struct_decl(&mut self, attrs: &mut Attrs) -> Maybe<StructId> {
        let Some(keyword) = self.eat(TokenKind::Struct) else {
            return Maybe::NoMatch;
        };
        let name = committed!(self.expect_ident("struct declaration"));
        trace!(name = name.text, "struct");
        let members = committed!(self.expect_struct_body());

        let decorations = self.attach_attrs(attrs);
        let name = self.builder.sym(name.text);
        let range = self.range_from(keyword.begin);
        Maybe::Matched(self.builder.create(Struct {
            name,
            members,
            decorations,
            range,
        }))
    }

    fn expect_struct_body(&mut self) -> Expect<MemberRange> {
        self.expect_brace_block("struct declaration", |p| {
            let mut errored = false;
            let mut members: SmallVec<[StructMember; 8]> = SmallVec::new();

            while p.is_synchronized()
                && !p.peek_is(TokenKind::BraceRight)
                && !p.peek().is_eof()
            {
                let member = p.sync(TokenKind::Semicolon, |p| -> Expect<StructMember> {
                    let mut attrs = Attrs::new();
                    if p.attribute_list(&mut attrs).is_err() {
                        errored = true;
                    }
                    if !p.is_synchronized() {
                        return Err(Errored);
                    }
                    p.expect_struct_member(&mut attrs)
                });
                match member {
                    Ok(member) => members.push(member),
                    Err(Errored) => errored = true,
                }
            }

            if errored {
                return Err(Errored);
            }
            Ok(p.builder.create_list(members))
        })
    }

    fn expect_struct_member(&mut self, attrs: &mut Attrs) -> Expect<StructMember> {
        const USE: &str = "struct member";

        let (ident, ty) = self.expect_typed_ident(USE)?;
        self.expect(USE, TokenKind::Semicolon)?;
        Ok(StructMember {
            name: self.builder.sym(ident.text),
            ty,
            decorations: self.attach_attrs(attrs),
            range: ident.range,
        })
    }

    /// `fn name(params) -> T { body }`
    ///
    /// A malformed header still has its body parsed when the parser can find
    /// the opening brace, so errors inside the body are reported too.
    pub(crate) fn function_decl(&mut self, attrs: &mut Attrs) -> Maybe<FunctionId> {
        let header = match self.function_header() {
            Maybe::Matched(header) => header,
            Maybe::NoMatch => return Maybe::NoMatch,
            Maybe::Errored => {
                if self.sync_to(TokenKind::BraceLeft, false) {
                    let _ = self.expect_body();
                }
                return Maybe::Errored;
            }
        };

        let body = committed!(self.expect_body());
        let decorations = self.attach_attrs(attrs);
        let range = self.range_from(header.begin);
        Maybe::Matched(self.builder.create(Function {
            name: header.name,
            params: header.params,
            return_type: header.return_type,
            return_decorations: header.return_decorations,
            decorations,
            body,
            range,
        }))
    }

    fn function_header(&mut self) -> Maybe<FunctionHeader> {
        const USE: &str = "function declaration";

        let Some(keyword) = self.eat(TokenKind::Fn) else {
            return Maybe::NoMatch;
        };
        let mut errored = false;

        let name = match self.expect_ident(USE) {
            Ok(ident) => {
                trace!(name = ident.text, "function");
                Some(self.builder.sym(ident.text))
            }
            Err(Errored) => {
                errored = true;
                if !self.sync_to(TokenKind::ParenLeft, false) {
                    return Maybe::Errored;
                }
                None
            }
        };

        let params = match self.expect_paren_block(USE, Self::expect_param_list) {
            Ok(params) => params,
            Err(Errored) => {
                errored = true;
                if !self.is_synchronized() {
                    return Maybe::Errored;
                }
                VariableRange::EMPTY
            }
        };

        let mut return_decorations = DecorationRange::EMPTY;
        let return_type = if self.eat(TokenKind::Arrow).is_some() {
            let mut attrs = Attrs::new();
            committed!(self.attribute_list(&mut attrs));
            return_decorations = self.attach_attrs(&mut attrs);

            if let Some(range) = self.eat(TokenKind::Void) {
                self.deprecated(range, "omit '-> void' for functions that do not return a value");
                Some(self.builder.create(Type::new(TypeKind::Void, range)))
            } else {
                match self.type_decl() {
                    Maybe::Matched(ty) => Some(ty),
                    Maybe::Errored => {
                        errored = true;
                        None
                    }
                    Maybe::NoMatch => {
                        self.add_error_at_peek("unable to determine function return type");
                        return Maybe::Errored;
                    }
                }
            }
        } else {
            Some(self.builder.create(Type::new(TypeKind::Void, Range::EMPTY)))
        };

        match (errored, name, return_type) {
            (false, Some(name), Some(return_type)) => Maybe::Matched(FunctionHeader {
                begin: keyword.begin,
                name,
                params,
                return_type,
                return_decorations,
            }),
            _ => Maybe::Errored,
        }
    }

    /// Parameters up to the closing `)`; a trailing comma is allowed.
    fn expect_param_list(&mut self) -> Expect<VariableRange> {
        let mut params: SmallVec<[VariableId; 8]> = SmallVec::new();
        while self.is_synchronized() {
            if !matches!(
                self.peek_kind(),
                TokenKind::Identifier | TokenKind::At | TokenKind::AttrLeft
            ) {
                break;
            }
            params.push(self.expect_param()?);
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }
        Ok(self.builder.create_list(params))
    }

    fn expect_param(&mut self) -> Expect<VariableId> {
        let mut attrs = Attrs::new();
        self.attribute_list(&mut attrs)?;
        let (ident, ty) = self.expect_typed_ident("parameter")?;
        let decorations = self.attach_attrs(&mut attrs);
        let name = self.builder.sym(ident.text);
        Ok(self.builder.create(Variable {
            name,
            kind: VariableKind::Param,
            ty: Some(ty),
            initializer: None,
            decorations,
            range: ident.range,
        }))
    }
}

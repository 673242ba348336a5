//! Attributes: `@name(args)` and the obsolete `[[name(args), ...]]` lists.
//!
//! Attributes are allocated as they are parsed and collected into an
//! [`Attrs`] buffer. The declaration that owns them takes the kinds it
//! understands and leaves the rest; anything left over is an error.

use shade_ir::{
    Access, Builtin, Decoration, DecorationId, DecorationKind, DecorationRange, ExprId,
    PipelineStage,
};
use shade_lexer::TokenKind;
use smallvec::SmallVec;
use tracing::trace;

use crate::outcome::{committed, Errored, Expect, Maybe};
use crate::Parser;

/// Attributes parsed ahead of the declaration they belong to.
pub(crate) type Attrs = SmallVec<[DecorationId; 4]>;

const ATTRIBUTE_NAMES: &[&str] = &[
    "access",
    "align",
    "binding",
    "block",
    "builtin",
    "group",
    "location",
    "offset",
    "override",
    "set",
    "size",
    "stage",
    "stride",
    "workgroup_size",
];

fn is_attribute_name(text: &str) -> bool {
    ATTRIBUTE_NAMES.contains(&text)
}

impl Parser<'_> {
    /// Parse any number of attributes into `attrs`.
    ///
    /// Keeps going after a malformed attribute while the parser is still
    /// synchronized, then reports errored if any attribute failed.
    pub(crate) fn attribute_list(&mut self, attrs: &mut Attrs) -> Expect<()> {
        let mut errored = false;
        while self.is_synchronized() {
            let result = match self.peek_kind() {
                TokenKind::At => self.at_attribute(attrs),
                TokenKind::AttrLeft => self.bracketed_attribute_list(attrs),
                _ => break,
            };
            if result.is_err() {
                errored = true;
            }
        }
        if errored {
            Err(Errored)
        } else {
            Ok(())
        }
    }

    /// `@name` or `@name(args)`.
    fn at_attribute(&mut self, attrs: &mut Attrs) -> Expect<()> {
        self.next();
        let id = self.expect_attribute()?;
        attrs.push(id);
        Ok(())
    }

    /// `[[a, b(1)]]`
    fn bracketed_attribute_list(&mut self, attrs: &mut Attrs) -> Expect<()> {
        const USE: &str = "attribute list";

        let open = self.next().range;
        self.deprecated(
            open,
            "[[attribute]] style attributes have been replaced with @attribute style",
        );
        if let Some(range) = self.eat(TokenKind::AttrRight) {
            return Err(self.add_error(range, "empty attribute list"));
        }

        self.sync(TokenKind::AttrRight, |p| -> Expect<()> {
            let mut errored = false;
            while p.is_synchronized() {
                match p.expect_attribute() {
                    Ok(id) => attrs.push(id),
                    Err(Errored) => errored = true,
                }

                if p.eat(TokenKind::Comma).is_some() {
                    continue;
                }

                let next = p.peek();
                if next.is_identifier() && is_attribute_name(next.text) {
                    // Two attributes without a separating comma.
                    p.expect(USE, TokenKind::Comma)?;
                    return Err(Errored);
                }
                break;
            }

            if errored {
                return Err(Errored);
            }
            p.expect(USE, TokenKind::AttrRight)?;
            Ok(())
        })
    }

    fn expect_attribute(&mut self) -> Expect<DecorationId> {
        let token = self.peek().clone();
        match self.attribute() {
            Maybe::Matched(id) => Ok(id),
            Maybe::Errored => Err(Errored),
            Maybe::NoMatch => Err(self.add_error_at(&token, "expected attribute")),
        }
    }

    /// One attribute body, after any `@`. Consumes the name token even when
    /// it is not an attribute.
    fn attribute(&mut self) -> Maybe<DecorationId> {
        let name = self.next();
        if !name.is_identifier() {
            return Maybe::NoMatch;
        }
        trace!(name = name.text, "attribute");
        let range = name.range;

        let kind = match name.text {
            "access" => self.expect_paren_block("access attribute", |p| -> Expect<DecorationKind> {
                let ident = p.expect_ident("access_type")?;
                match Access::from_name(ident.text) {
                    Some(access) => Ok(DecorationKind::Access(access)),
                    None => Err(p.add_error(ident.range, "invalid value for access attribute")),
                }
            }),
            "location" => self.int_attribute("location attribute", DecorationKind::Location),
            "binding" => self.int_attribute("binding attribute", DecorationKind::Binding),
            "group" | "set" => self.int_attribute("group attribute", DecorationKind::Group),
            "builtin" => self.expect_paren_block("builtin attribute", |p| {
                p.expect_builtin().map(DecorationKind::Builtin)
            }),
            "workgroup_size" => self.expect_paren_block("workgroup_size attribute", Self::workgroup_size),
            "stage" => self.expect_paren_block("stage attribute", |p| {
                p.expect_pipeline_stage().map(DecorationKind::Stage)
            }),
            "block" => Ok(DecorationKind::Block),
            "stride" => self.expect_paren_block("stride attribute", |p| {
                p.expect_nonzero_positive_sint("stride attribute")
                    .map(DecorationKind::Stride)
            }),
            "offset" => {
                self.deprecated(range, "[[offset]] has been replaced with [[size]] and [[align]]");
                self.int_attribute("offset attribute", DecorationKind::Offset)
            }
            "size" => self.expect_paren_block("size attribute", |p| {
                p.expect_nonzero_positive_sint("size attribute")
                    .map(DecorationKind::Size)
            }),
            "align" => self.expect_paren_block("align attribute", |p| {
                p.expect_nonzero_positive_sint("align attribute")
                    .map(DecorationKind::Align)
            }),
            "override" => {
                if self.peek_is(TokenKind::ParenLeft) {
                    self.expect_paren_block("override attribute", |p| {
                        p.expect_positive_sint("override attribute")
                            .map(|id| DecorationKind::Override(Some(id)))
                    })
                } else {
                    Ok(DecorationKind::Override(None))
                }
            }
            _ => return Maybe::NoMatch,
        };

        let kind = committed!(kind);
        Maybe::Matched(self.builder.create(Decoration::new(kind, range)))
    }

    /// `(n)` with a non-negative integer.
    fn int_attribute(
        &mut self,
        use_: &str,
        make: impl FnOnce(u32) -> DecorationKind,
    ) -> Expect<DecorationKind> {
        self.expect_paren_block(use_, |p| p.expect_positive_sint(use_).map(make))
    }

    /// `x[, y[, z]]`, each a literal or identifier.
    fn workgroup_size(&mut self) -> Expect<DecorationKind> {
        let x = self.workgroup_dimension("x")?;
        let mut y = None;
        let mut z = None;
        if self.eat(TokenKind::Comma).is_some() {
            y = Some(self.workgroup_dimension("y")?);
            if self.eat(TokenKind::Comma).is_some() {
                z = Some(self.workgroup_dimension("z")?);
            }
        }
        Ok(DecorationKind::WorkgroupSize { x, y, z })
    }

    fn workgroup_dimension(&mut self, axis: &str) -> Expect<ExprId> {
        match self.primary_expression() {
            Maybe::Matched(expr) => Ok(expr),
            Maybe::Errored => Err(Errored),
            Maybe::NoMatch => {
                Err(self.add_error_at_peek(format!("expected workgroup_size {axis} parameter")))
            }
        }
    }

    fn expect_pipeline_stage(&mut self) -> Expect<PipelineStage> {
        let token = self.peek().clone();
        if token.is_identifier() {
            if let Some(stage) = PipelineStage::from_name(token.text) {
                self.next();
                return Ok(stage);
            }
        }
        Err(self.add_error_at(&token, "invalid value for stage attribute"))
    }

    fn expect_builtin(&mut self) -> Expect<Builtin> {
        let ident = self.expect_ident("builtin")?;
        if let Some(builtin) = Builtin::from_name(ident.text) {
            return Ok(builtin);
        }
        match Builtin::from_deprecated_name(ident.text) {
            Some(builtin) => {
                let message = format!("use '{}' instead of '{}'", builtin.as_str(), ident.text);
                self.deprecated(ident.range, &message);
                Ok(builtin)
            }
            None => Err(self.add_error(ident.range, "invalid value for builtin attribute")),
        }
    }

    // === Consuming collected attributes ===

    /// Remove and return the attributes matching `pick`, keeping the rest.
    pub(crate) fn take_attrs(
        &self,
        attrs: &mut Attrs,
        pick: impl Fn(&DecorationKind) -> bool,
    ) -> Attrs {
        let mut taken = Attrs::new();
        attrs.retain(|id| {
            if pick(&self.builder[*id].kind) {
                taken.push(*id);
                false
            } else {
                true
            }
        });
        taken
    }

    /// Move all of `attrs` into the arena as one list.
    ///
    /// A kind may appear once per list; each repeat is reported at its name
    /// but still attached.
    pub(crate) fn attach_attrs(&mut self, attrs: &mut Attrs) -> DecorationRange {
        for (i, id) in attrs.iter().enumerate() {
            let decoration = &self.builder[*id];
            let name = decoration.kind.name();
            if attrs[..i].iter().any(|prev| self.builder[*prev].kind.name() == name) {
                let range = decoration.range;
                self.add_error(range, format!("duplicate {name} attribute"));
            }
        }
        self.builder.create_list(attrs.drain(..))
    }

    /// Report `unexpected attributes` at the first attribute left over.
    pub(crate) fn expect_attrs_consumed(&mut self, attrs: &Attrs) -> Expect<()> {
        match attrs.first() {
            None => Ok(()),
            Some(first) => {
                let range = self.builder[*first].range;
                Err(self.add_error(range, "unexpected attributes"))
            }
        }
    }
}

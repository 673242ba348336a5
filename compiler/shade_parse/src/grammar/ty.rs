//! Type specifiers.

use shade_ir::{
    Range, SamplerKind, StorageClass, TexelFormat, TextureDimension, Type, TypeId, TypeKind,
};
use shade_lexer::TokenKind;

use crate::grammar::Attrs;
use crate::outcome::{committed, Errored, Expect, Maybe};
use crate::Parser;

fn vector_width(kind: TokenKind) -> Option<u8> {
    match kind {
        TokenKind::Vec2 => Some(2),
        TokenKind::Vec3 => Some(3),
        TokenKind::Vec4 => Some(4),
        _ => None,
    }
}

/// `(columns, rows)` of a `matCxR` keyword.
fn matrix_shape(kind: TokenKind) -> Option<(u8, u8)> {
    Some(match kind {
        TokenKind::Mat2x2 => (2, 2),
        TokenKind::Mat2x3 => (2, 3),
        TokenKind::Mat2x4 => (2, 4),
        TokenKind::Mat3x2 => (3, 2),
        TokenKind::Mat3x3 => (3, 3),
        TokenKind::Mat3x4 => (3, 4),
        TokenKind::Mat4x2 => (4, 2),
        TokenKind::Mat4x3 => (4, 3),
        TokenKind::Mat4x4 => (4, 4),
        _ => return None,
    })
}

fn sampled_dimension(kind: TokenKind) -> Option<TextureDimension> {
    Some(match kind {
        TokenKind::TextureSampled1d => TextureDimension::D1,
        TokenKind::TextureSampled2d => TextureDimension::D2,
        TokenKind::TextureSampled2dArray => TextureDimension::D2Array,
        TokenKind::TextureSampled3d => TextureDimension::D3,
        TokenKind::TextureSampledCube => TextureDimension::Cube,
        TokenKind::TextureSampledCubeArray => TextureDimension::CubeArray,
        _ => return None,
    })
}

fn depth_dimension(kind: TokenKind) -> Option<TextureDimension> {
    Some(match kind {
        TokenKind::TextureDepth2d => TextureDimension::D2,
        TokenKind::TextureDepth2dArray => TextureDimension::D2Array,
        TokenKind::TextureDepthCube => TextureDimension::Cube,
        TokenKind::TextureDepthCubeArray => TextureDimension::CubeArray,
        _ => return None,
    })
}

fn storage_dimension(kind: TokenKind) -> Option<TextureDimension> {
    Some(match kind {
        TokenKind::TextureStorage1d => TextureDimension::D1,
        TokenKind::TextureStorage2d => TextureDimension::D2,
        TokenKind::TextureStorage2dArray => TextureDimension::D2Array,
        TokenKind::TextureStorage3d => TextureDimension::D3,
        _ => return None,
    })
}

fn storage_class(kind: TokenKind) -> Option<StorageClass> {
    Some(match kind {
        TokenKind::In => StorageClass::Input,
        TokenKind::Out => StorageClass::Output,
        TokenKind::Uniform => StorageClass::Uniform,
        TokenKind::Workgroup => StorageClass::Workgroup,
        TokenKind::Storage => StorageClass::Storage,
        TokenKind::Image => StorageClass::Image,
        TokenKind::Private => StorageClass::Private,
        TokenKind::Function => StorageClass::Function,
        _ => return None,
    })
}

impl Parser<'_> {
    /// A type with no attributes in front of it.
    pub(crate) fn type_decl(&mut self) -> Maybe<TypeId> {
        self.type_decl_with_attrs(&mut Attrs::new())
    }

    /// A type. An `array` takes every attribute in `attrs`; other types take
    /// none.
    pub(crate) fn type_decl_with_attrs(&mut self, attrs: &mut Attrs) -> Maybe<TypeId> {
        let token = self.peek().clone();
        let begin = token.range.begin;

        let kind = match token.kind {
            TokenKind::Identifier => {
                self.next();
                if !self.is_constructed(token.text) {
                    let message = format!("unknown constructed type '{}'", token.text);
                    self.add_error_at(&token, message);
                    return Maybe::Errored;
                }
                TypeKind::Named(self.builder.sym(token.text))
            }
            TokenKind::Bool => self.scalar(TypeKind::Bool),
            TokenKind::F32 => self.scalar(TypeKind::F32),
            TokenKind::I32 => self.scalar(TypeKind::I32),
            TokenKind::U32 => self.scalar(TypeKind::U32),
            TokenKind::Ptr => {
                self.next();
                let (storage, pointee) = committed!(self.pointer_args());
                TypeKind::Pointer { storage, pointee }
            }
            TokenKind::Array => {
                self.next();
                let (elem, size) = committed!(self.array_args());
                let decorations = self.attach_attrs(attrs);
                TypeKind::Array {
                    elem,
                    size,
                    decorations,
                }
            }
            TokenKind::Sampler => self.scalar(TypeKind::Sampler(SamplerKind::Sampler)),
            TokenKind::ComparisonSampler => {
                self.scalar(TypeKind::Sampler(SamplerKind::Comparison))
            }
            TokenKind::TextureExternal => self.scalar(TypeKind::ExternalTexture),
            TokenKind::TextureMultisampled2d => {
                self.next();
                let elem = committed!(self.element_type("multisampled texture type"));
                TypeKind::MultisampledTexture {
                    dim: TextureDimension::D2,
                    elem,
                }
            }
            kind => {
                if let Some(width) = vector_width(kind) {
                    self.next();
                    let elem = committed!(self.element_type("vector"));
                    TypeKind::Vector { width, elem }
                } else if let Some((columns, rows)) = matrix_shape(kind) {
                    self.next();
                    let elem = committed!(self.element_type("matrix"));
                    TypeKind::Matrix {
                        columns,
                        rows,
                        elem,
                    }
                } else if let Some(dim) = depth_dimension(kind) {
                    self.scalar(TypeKind::DepthTexture(dim))
                } else if let Some(dim) = sampled_dimension(kind) {
                    self.next();
                    let elem = committed!(self.element_type("sampled texture type"));
                    TypeKind::SampledTexture { dim, elem }
                } else if let Some(dim) = storage_dimension(kind) {
                    self.next();
                    let format = committed!(self.expect_lt_gt_block("storage texture type", |p| {
                        p.expect_texel_format("storage texture type")
                    }));
                    TypeKind::StorageTexture { dim, format }
                } else {
                    return Maybe::NoMatch;
                }
            }
        };

        let range = self.range_from(begin);
        Maybe::Matched(self.builder.create(Type::new(kind, range)))
    }

    /// A single-token type.
    fn scalar(&mut self, kind: TypeKind) -> TypeKind {
        self.next();
        kind
    }

    /// A type that must be present, or `invalid type for <use_>`.
    pub(crate) fn expect_type(&mut self, use_: &str) -> Expect<TypeId> {
        match self.type_decl() {
            Maybe::Matched(ty) => Ok(ty),
            Maybe::Errored => Err(Errored),
            Maybe::NoMatch => {
                let range = self.peek_range();
                Err(self.add_error(range, format!("invalid type for {use_}")))
            }
        }
    }

    /// `<T>`
    fn element_type(&mut self, use_: &str) -> Expect<TypeId> {
        self.expect_lt_gt_block(use_, |p| p.expect_type(use_))
    }

    /// `<class, T>`
    fn pointer_args(&mut self) -> Expect<(StorageClass, TypeId)> {
        const USE: &str = "ptr declaration";
        self.expect_lt_gt_block(USE, |p| {
            let (storage, _) = p.expect_storage_class(USE)?;
            p.expect(USE, TokenKind::Comma)?;
            let pointee = p.expect_type(USE)?;
            Ok((storage, pointee))
        })
    }

    /// `<T>` or `<T, N>` with `N > 0`.
    fn array_args(&mut self) -> Expect<(TypeId, Option<u32>)> {
        const USE: &str = "array declaration";
        self.expect_lt_gt_block(USE, |p| {
            let elem = p.expect_type(USE)?;
            let size = match p.eat(TokenKind::Comma) {
                Some(_) => Some(p.expect_nonzero_positive_sint("array size")?),
                None => None,
            };
            Ok((elem, size))
        })
    }

    fn expect_texel_format(&mut self, use_: &str) -> Expect<TexelFormat> {
        if let TokenKind::TexelFormat(format) = self.peek_kind() {
            self.next();
            return Ok(format);
        }
        let range = self.peek_range();
        Err(self.add_error(range, format!("invalid format for {use_}")))
    }

    /// A storage class keyword and where it was written.
    pub(crate) fn expect_storage_class(
        &mut self,
        use_: &str,
    ) -> Expect<(StorageClass, Range)> {
        let range = self.peek_range();
        match storage_class(self.peek_kind()) {
            Some(class) => {
                self.next();
                Ok((class, range))
            }
            None => Err(self.add_error(range, format!("invalid storage class for {use_}"))),
        }
    }
}

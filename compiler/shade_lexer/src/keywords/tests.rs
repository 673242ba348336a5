use super::*;

#[test]
fn control_flow_keywords() {
    assert_eq!(lookup("if"), Some(TokenKind::If));
    assert_eq!(lookup("else"), Some(TokenKind::Else));
    assert_eq!(lookup("elseif"), Some(TokenKind::ElseIf));
    assert_eq!(lookup("for"), Some(TokenKind::For));
    assert_eq!(lookup("loop"), Some(TokenKind::Loop));
    assert_eq!(lookup("continuing"), Some(TokenKind::Continuing));
    assert_eq!(lookup("fallthrough"), Some(TokenKind::Fallthrough));
    assert_eq!(lookup("discard"), Some(TokenKind::Discard));
}

#[test]
fn type_keywords() {
    assert_eq!(lookup("f32"), Some(TokenKind::F32));
    assert_eq!(lookup("mat3x2"), Some(TokenKind::Mat3x2));
    assert_eq!(lookup("vec4"), Some(TokenKind::Vec4));
    assert_eq!(lookup("sampler_comparison"), Some(TokenKind::ComparisonSampler));
    assert_eq!(
        lookup("texture_storage_2d_array"),
        Some(TokenKind::TextureStorage2dArray)
    );
    assert_eq!(
        lookup("texture_depth_cube_array"),
        Some(TokenKind::TextureDepthCubeArray)
    );
}

#[test]
fn storage_buffer_is_storage() {
    assert_eq!(lookup("storage_buffer"), Some(TokenKind::Storage));
    assert_eq!(lookup("storage"), Some(TokenKind::Storage));
}

#[test]
fn texel_formats() {
    for &format in TexelFormat::ALL {
        assert_eq!(
            lookup(format.as_str()),
            Some(TokenKind::TexelFormat(format)),
            "{}",
            format.as_str()
        );
    }
}

#[test]
fn keyword_names_round_trip() {
    for text in ["array", "bitcast", "const", "ptr", "workgroup", "void", "type"] {
        let kind = lookup(text);
        assert_eq!(kind.map(TokenKind::name), Some(text));
    }
}

#[test]
fn identifiers_are_not_keywords() {
    assert_eq!(lookup("x"), None);
    assert_eq!(lookup("main"), None);
    assert_eq!(lookup("If"), None);
    assert_eq!(lookup("location"), None);
    assert_eq!(lookup("_if"), None);
    assert_eq!(lookup("texture_storage_2d_array_x"), None);
}

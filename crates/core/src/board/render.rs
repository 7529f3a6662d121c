//! Piece renderers: the built-in piece set or caller-supplied drawing code.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use super::types::{Piece, Square};

/// What a renderer gets to know about the piece it draws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PieceRenderContext {
    pub piece: Piece,
    pub square: Option<Square>,
    pub square_width: f32,
    pub is_dragging: bool,
    pub is_premoved: bool,
}

pub type RenderFn = Arc<dyn Fn(&PieceRenderContext) -> String + Send + Sync>;

#[derive(Clone)]
pub enum PieceRenderer {
    BuiltIn,
    Custom(RenderFn),
}

impl PieceRenderer {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&PieceRenderContext) -> String + Send + Sync + 'static,
    {
        PieceRenderer::Custom(Arc::new(f))
    }

    pub fn render(&self, ctx: &PieceRenderContext) -> String {
        match self {
            PieceRenderer::BuiltIn => builtin_asset(ctx.piece),
            PieceRenderer::Custom(f) => f(ctx),
        }
    }
}

impl fmt::Debug for PieceRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceRenderer::BuiltIn => f.write_str("BuiltIn"),
            PieceRenderer::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Asset path of the bundled image for a piece.
pub fn builtin_asset(piece: Piece) -> String {
    format!("pieces/{}.svg", piece.tag())
}

/// Renderer per piece; pieces without an entry use the built-in set.
#[derive(Debug, Clone, Default)]
pub struct PieceSet {
    renderers: HashMap<Piece, PieceRenderer>,
}

impl PieceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, piece: Piece, renderer: PieceRenderer) {
        match renderer {
            PieceRenderer::BuiltIn => {
                self.renderers.remove(&piece);
            }
            custom => {
                self.renderers.insert(piece, custom);
            }
        }
    }

    pub fn render(&self, ctx: &PieceRenderContext) -> String {
        match self.renderers.get(&ctx.piece) {
            Some(renderer) => renderer.render(ctx),
            None => builtin_asset(ctx.piece),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(tag: &str) -> PieceRenderContext {
        PieceRenderContext {
            piece: tag.parse().unwrap(),
            square: Some("e4".parse().unwrap()),
            square_width: 50.0,
            is_dragging: false,
            is_premoved: true,
        }
    }

    #[test]
    fn test_builtin_assets() {
        let set = PieceSet::new();
        assert_eq!(set.render(&ctx("wQ")), "pieces/wQ.svg");
        assert_eq!(set.render(&ctx("bK")), "pieces/bK.svg");
    }

    #[test]
    fn test_custom_renderer_gets_context() {
        let mut set = PieceSet::new();
        set.set(
            "wN".parse().unwrap(),
            PieceRenderer::custom(|ctx| {
                format!(
                    "<knight at={} size={} ghost={}>",
                    ctx.square.map(|s| s.to_string()).unwrap_or_default(),
                    ctx.square_width,
                    ctx.is_premoved
                )
            }),
        );

        assert_eq!(set.render(&ctx("wN")), "<knight at=e4 size=50 ghost=true>");
        assert_eq!(set.render(&ctx("bN")), "pieces/bN.svg");

        set.set("wN".parse().unwrap(), PieceRenderer::BuiltIn);
        assert_eq!(set.render(&ctx("wN")), "pieces/wN.svg");
    }
}

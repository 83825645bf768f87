//! Core merger infrastructure: token cursor, follower checks, error helpers.

use psc_tokens::{allowed_followers, may_follow, BuilderType, GroupSet, SpecificType, Token};
use psc_types::{ErrorCode, Limits, PscError, Result, Span};

use crate::ast::Expr;

/// The PSC expression merger.
///
/// Walks an immutable token line with an index cursor. Each `merge_*` call
/// consumes a prefix of the remaining tokens and leaves the cursor right
/// after it, so callers can continue with whatever follows.
pub struct Merger<'t> {
    /// The token line.
    tokens: &'t [Token],
    /// Current index into `tokens`.
    pos: usize,
    /// Effective kind of the last consumed token (prefix readings applied).
    prev: Option<SpecificType>,
    /// Structural bounds.
    limits: Limits,
    /// Current nesting depth of value positions.
    pub(crate) depth: u32,
}

impl<'t> Merger<'t> {
    /// Create a merger over one token line.
    pub fn new(tokens: &'t [Token], limits: Limits) -> Self {
        Self {
            tokens,
            pos: 0,
            prev: None,
            limits,
            depth: 0,
        }
    }

    /// Merge a complete value line. Every token must be consumed.
    pub fn merge_line(&mut self) -> Result<Expr> {
        if self.tokens.len() > self.limits.max_tokens_per_line {
            tracing::warn!(
                tokens = self.tokens.len(),
                max = self.limits.max_tokens_per_line,
                "token line too long"
            );
            let span = self.tokens.first().map_or(Span::point(1, 1), |t| t.span);
            return Err(PscError::new(
                ErrorCode::STRUCTURAL_LIMIT_EXCEEDED,
                format!(
                    "a line may hold at most {} tokens, got {}",
                    self.limits.max_tokens_per_line,
                    self.tokens.len()
                ),
                span,
            ));
        }
        let expr = self.merge_value()?;
        if let Some(token) = self.peek() {
            return Err(self.trailing_token(token));
        }
        tracing::debug!(line = expr.span.line, tokens = self.tokens.len(), "merged line");
        Ok(expr)
    }

    /// Index of the next unconsumed token.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns `true` once every token has been consumed.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    /// Returns the kind of the current token.
    pub(crate) fn peek_kind(&self) -> Option<SpecificType> {
        self.peek().map(|t| t.kind)
    }

    /// Look ahead by `n` tokens from the current position.
    pub(crate) fn look_ahead(&self, n: usize) -> Option<SpecificType> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    /// Returns `true` if the current token is the given builder.
    pub(crate) fn check_builder(&self, builder: BuilderType) -> bool {
        self.peek_kind() == Some(SpecificType::Builder(builder))
    }

    /// Consume the current token under its own kind.
    pub(crate) fn advance(&mut self) -> Result<&'t Token> {
        let kind = self.peek_kind();
        match kind {
            Some(kind) => self.advance_as(kind),
            None => Err(self.missing_operand()),
        }
    }

    /// Consume the current token, reading it as `kind`.
    ///
    /// Fails if `kind` may not follow the previously consumed token.
    pub(crate) fn advance_as(&mut self, kind: SpecificType) -> Result<&'t Token> {
        let Some(token) = self.peek() else {
            return Err(self.missing_operand());
        };
        if let Some(prev) = self.prev {
            if !may_follow(prev, kind) {
                return Err(self.illegal_follower(token, prev, kind));
            }
        }
        self.pos += 1;
        self.prev = Some(kind);
        Ok(token)
    }

    /// Consume the given builder or fail with `code`.
    pub(crate) fn expect_builder(
        &mut self,
        builder: BuilderType,
        code: ErrorCode,
        opened_at: Span,
    ) -> Result<&'t Token> {
        if self.check_builder(builder) {
            return self.advance();
        }
        let span = self.peek().map_or_else(|| self.previous_span(), |t| t.span);
        let found = self
            .peek()
            .map_or_else(|| "the end of the line".to_string(), |t| format!("'{}'", t.text));
        Err(PscError::new(
            code,
            format!("expected '{builder}' on line {}, found {found}", span.line),
            span,
        )
        .with_suggestion(format!(
            "close the bracket opened at column {}",
            opened_at.start_col
        )))
    }

    /// Returns the previously consumed token's span.
    pub(crate) fn previous_span(&self) -> Span {
        self.pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .or_else(|| self.tokens.last())
            .map_or(Span::point(1, 1), |t| t.span)
    }

    // ── Nesting ───────────────────────────────────────────────────────────────

    /// Enter a nested value position.
    pub(crate) fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.limits.max_nesting_depth {
            tracing::warn!(max = self.limits.max_nesting_depth, "nesting limit hit");
            let span = self.peek().map_or_else(|| self.previous_span(), |t| t.span);
            let err = PscError::new(
                ErrorCode::STRUCTURAL_LIMIT_EXCEEDED,
                format!(
                    "maximum nesting depth is {}, exceeded on line {}",
                    self.limits.max_nesting_depth, span.line
                ),
                span,
            );
            self.depth -= 1;
            return Err(err);
        }
        Ok(())
    }

    /// Leave a nested value position.
    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    // ── Error Reporting ───────────────────────────────────────────────────────

    /// No token where a value was required.
    pub(crate) fn missing_operand(&self) -> PscError {
        let span = self.previous_span();
        let message = match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(prev) => format!("expected a value after '{}' on line {}", prev.text, span.line),
            None => format!("expected a value on line {}", span.line),
        };
        // A line that runs out after at least one token ended early.
        let code = if self.tokens.is_empty() {
            ErrorCode::MISSING_OPERAND
        } else {
            ErrorCode::UNEXPECTED_END
        };
        PscError::new(code, message, span)
    }

    /// A token that cannot appear where it was found.
    pub(crate) fn unexpected(&self, token: &Token, expected: GroupSet) -> PscError {
        PscError::new(
            ErrorCode::ILLEGAL_CODE_FORMAT,
            format!(
                "'{}' cannot appear here on line {}, expected {expected}",
                token.text,
                token.line()
            ),
            token.span,
        )
    }

    fn illegal_follower(&self, token: &Token, prev: SpecificType, kind: SpecificType) -> PscError {
        PscError::new(
            ErrorCode::ILLEGAL_CODE_FORMAT,
            format!(
                "'{}' ({}) cannot follow '{prev}' on line {}, expected {}",
                token.text,
                kind.group(),
                token.line(),
                allowed_followers(prev)
            ),
            token.span,
        )
    }

    /// A token left over after a complete value.
    fn trailing_token(&self, token: &Token) -> PscError {
        match self.prev {
            Some(prev) if !may_follow(prev, token.kind) => {
                self.illegal_follower(token, prev, token.kind)
            }
            _ => PscError::new(
                ErrorCode::ILLEGAL_CODE_FORMAT,
                format!(
                    "unexpected '{}' after a complete value on line {}",
                    token.text,
                    token.line()
                ),
                token.span,
            ),
        }
    }
}

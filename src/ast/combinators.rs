/// How one simple selector's matches relate to the next one's candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinatorKind {
    /// Descendant combinator (space)
    ///
    /// Candidates become every node below the current matches.
    ///
    /// # Examples
    /// ```text
    /// Panel Button
    /// ```
    Descendant,

    /// Child combinator (`>`)
    ///
    /// Candidates become the direct children of container matches.
    ///
    /// # Examples
    /// ```text
    /// Panel>Button
    /// ```
    Child,

    /// Adjacent combinator (`+`)
    ///
    /// Candidates become the siblings of the current matches, with the
    /// matches themselves retained.
    ///
    /// # Examples
    /// ```text
    /// TextBox+Button
    /// ```
    Adjacent,
}

/// A combinator between two simple selectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Combinator {
    pub kind: CombinatorKind,
    /// The character the combinator was parsed from
    pub symbol: char,
}

//! Symbol table construction from raw source lines
//!
//! The builder makes three passes over the file. The first detects
//! scope-opening constructs (function definitions, pure `Function`
//! expressions, Module/Block/With, Do/Table loops) and grows the scope
//! tree, declaring parameters and scoped variables as it goes. The second records every assignment,
//! creating implicit global symbols for names assigned without a prior
//! declaration. The third records reads, resolving each identifier
//! through the scope chain; reads that resolve nowhere are kept as
//! unresolved references.
//!
//! There is no real Wolfram Language parser behind this. Scope extents
//! come from bracket counting on cleaned lines, which is robust enough
//! for conventionally formatted package files.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::semantic::scope::{ScopeId, ScopeKind, ScopeTree};
use crate::semantic::symbols::{SymbolArena, SymbolReference};
use crate::semantic::table::SymbolTable;
use crate::source::SourceFile;
use crate::text::clean_line;

static SCOPING_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(Module|Block|With)\s*\[\s*\{([^}]*)\}").expect("Invalid regex pattern")
});

static FUNCTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z][A-Za-z0-9]*)\s*\[([^\]]*)\]\s*:=").expect("Invalid regex pattern")
});

static LOOP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(Do|Table)\s*\[").expect("Invalid regex pattern"));

// Binders are `{y, z}` or a bare symbol before the body; slot-only
// bodies like Function[#^2] leave both groups empty.
static PURE_FUNCTION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bFunction\s*\[\s*(?:\{([^}]*)\}|([A-Za-z][A-Za-z0-9]*)\s*,)?")
        .expect("Invalid regex pattern")
});

static ITERATOR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\s*([A-Za-z][A-Za-z0-9]*)\s*,").expect("Invalid regex pattern")
});

static ASSIGNMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Za-z][A-Za-z0-9]*)\s*(:=|=)").expect("Invalid regex pattern")
});

static IDENT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9]*").expect("Invalid regex pattern"));

static BINDER_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([A-Za-z][A-Za-z0-9]*)").expect("Invalid regex pattern"));

/// Built-in heads that are never user symbols.
static BUILTINS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    HashSet::from([
        // Control flow
        "If", "Which", "Switch", "Do", "While", "For", "Return", "Break", "Continue",
        // Functional programming
        "Map", "MapAt", "MapIndexed", "MapThread", "Apply", "Scan", "Fold", "FoldList", "Nest",
        "NestList", "NestWhile", "FixedPoint", "FixedPointList",
        // Scoping
        "Module", "Block", "With", "Function", "DynamicModule",
        // List operations
        "Table", "Range", "Array", "List", "Join", "Append", "Prepend", "AppendTo", "PrependTo",
        "Insert", "Delete", "Take", "Drop", "Part", "Extract", "Select", "Cases", "DeleteCases",
        "Flatten", "Partition", "Split", "Riffle", "Thread", "Transpose", "Reverse",
        // List queries
        "Length", "First", "Last", "Rest", "Most", "MemberQ", "FreeQ", "Count", "Position",
        "FirstPosition",
        // Type checking
        "Head", "AtomQ", "ListQ", "NumberQ", "IntegerQ", "RealQ", "StringQ", "SymbolQ", "VectorQ",
        "MatrixQ", "ArrayQ",
        // Association access
        "Key", "Lookup", "Keys", "Values", "KeyExistsQ", "Association",
        // String operations
        "StringJoin", "StringLength", "StringTake", "StringDrop", "ToString",
        // Basic math
        "Plus", "Times", "Subtract", "Divide", "Power", "Mod", "Min", "Max", "Abs", "Sign",
        "Round", "Floor", "Ceiling",
        // Comparison
        "Equal", "Unequal", "Less", "Greater", "LessEqual", "GreaterEqual", "SameQ", "UnsameQ",
        "MatchQ",
        // Logic
        "And", "Or", "Not", "Xor", "Nand", "Nor",
        // Constants
        "True", "False", "Null", "None", "All", "Automatic", "Identity",
        // Pattern matching
        "Replace", "ReplaceAll", "ReplaceRepeated", "Rule", "RuleDelayed",
        // Set operations
        "Union", "Intersection", "Complement", "Subsets", "Tuples",
        // Common math functions
        "Sin", "Cos", "Tan", "Exp", "Log", "Sqrt", "Total", "Mean", "Integrate", "D", "Sum",
        "Product", "Solve", "NSolve", "FindRoot",
        // Output
        "Print", "Plot", "ListPlot", "Show", "Graphics",
    ])
});

pub fn is_builtin(name: &str) -> bool {
    BUILTINS.contains(name)
}

const MAX_LINE_LENGTH: usize = 10_000;
const MIN_LINE_LENGTH: usize = 3;

fn skip_line(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.len() < MIN_LINE_LENGTH
        || raw.len() > MAX_LINE_LENGTH
        || trimmed.starts_with("(*")
        || trimmed.starts_with("//")
}

struct OpenScope {
    id: ScopeId,
    end_line: usize,
    end_col: usize,
}

/// A scope-opening construct found on a line, ordered by column so
/// nesting within a single line mirrors source order.
enum Opening {
    Function {
        name_start: usize,
        name: String,
        params: String,
        def_end: usize,
    },
    Scoping {
        kind: ScopeKind,
        bracket: usize,
        binders: String,
    },
    Loop {
        name: String,
        bracket: usize,
    },
    PureFunction {
        bracket: usize,
        binders: String,
    },
}

impl Opening {
    fn column(&self) -> usize {
        match self {
            Opening::Function { name_start, .. } => *name_start,
            Opening::Scoping { bracket, .. } => *bracket,
            Opening::Loop { bracket, .. } => *bracket,
            Opening::PureFunction { bracket, .. } => *bracket,
        }
    }
}

pub struct SymbolTableBuilder<'a> {
    file: &'a SourceFile,
    cleaned: Vec<String>,
    tree: ScopeTree,
    symbols: SymbolArena,
    global: ScopeId,
    /// Declaration sites found outside binder lists, such as loop
    /// iterators. The read pass skips identifiers at these positions.
    declared_sites: std::collections::HashSet<(usize, usize)>,
}

impl<'a> SymbolTableBuilder<'a> {
    pub fn build(file: &'a SourceFile) -> SymbolTable {
        let cleaned: Vec<String> = file.lines().map(|(_, l)| clean_line(l)).collect();

        let mut tree = ScopeTree::new();
        let last_line = file.line_count().max(1);
        let global = tree.create_scope(ScopeKind::Global, None, 1, last_line, None);

        let mut builder = Self {
            file,
            cleaned,
            tree,
            symbols: SymbolArena::new(),
            global,
            declared_sites: std::collections::HashSet::new(),
        };

        builder.build_scopes();
        builder.track_assignments();
        builder.track_reads();

        tracing::debug!(
            file = %builder.file.metadata().filename,
            scopes = builder.tree.len(),
            symbols = builder.symbols.len(),
            "symbol table built"
        );

        SymbolTable::new(builder.tree, builder.symbols, builder.global)
    }

    fn context_for(&self, line: usize) -> String {
        self.file
            .get_line(line)
            .map(|l| l.trim().to_string())
            .unwrap_or_default()
    }

    fn build_scopes(&mut self) {
        let mut stack: Vec<OpenScope> = vec![OpenScope {
            id: self.global,
            end_line: self.file.line_count() + 1,
            end_col: usize::MAX,
        }];

        for line_number in 1..=self.cleaned.len() {
            while stack.len() > 1 && stack[stack.len() - 1].end_line < line_number {
                stack.pop();
            }

            let raw = self.file.get_line(line_number).unwrap_or_default();
            if skip_line(raw) {
                continue;
            }

            let openings = self.collect_openings(line_number);

            for opening in openings {
                let col = opening.column();
                while stack.len() > 1 {
                    let top = &stack[stack.len() - 1];
                    if top.end_line < line_number
                        || (top.end_line == line_number && top.end_col < col)
                    {
                        stack.pop();
                    } else {
                        break;
                    }
                }
                let parent = stack[stack.len() - 1].id;

                match opening {
                    Opening::Function {
                        name_start,
                        name,
                        params,
                        def_end,
                    } => {
                        let (end_line, end_col) = self.body_extent(line_number, def_end);
                        let scope = self.tree.create_scope(
                            ScopeKind::Function,
                            Some(parent),
                            line_number,
                            end_line,
                            Some(name.clone()),
                        );

                        let head = self.symbols.declare(&name, parent, line_number, false, false);
                        self.symbols.add_assignment(
                            head,
                            SymbolReference {
                                line: line_number,
                                column: name_start,
                                context: self.context_for(line_number),
                            },
                        );

                        self.declare_parameters(scope, &params, line_number);

                        stack.push(OpenScope {
                            id: scope,
                            end_line,
                            end_col,
                        });
                    }
                    Opening::Scoping {
                        kind,
                        bracket,
                        binders,
                    } => {
                        let (end_line, end_col) = self.bracket_extent(line_number, bracket);
                        let scope = self.tree.create_scope(
                            kind,
                            Some(parent),
                            line_number,
                            end_line,
                            None,
                        );

                        self.declare_binders(scope, &binders, line_number);

                        stack.push(OpenScope {
                            id: scope,
                            end_line,
                            end_col,
                        });
                    }
                    Opening::Loop { name, bracket } => {
                        let (end_line, end_col) = self.bracket_extent(line_number, bracket);
                        let scope = self.tree.create_scope(
                            ScopeKind::Loop,
                            Some(parent),
                            line_number,
                            end_line,
                            Some(name),
                        );

                        if let Some((iterator, iter_line, iter_col)) =
                            self.find_iterator(line_number, bracket, end_line)
                        {
                            if !is_builtin(&iterator) {
                                self.symbols.declare(&iterator, scope, iter_line, false, true);
                                self.declared_sites.insert((iter_line, iter_col));
                            }
                        }

                        stack.push(OpenScope {
                            id: scope,
                            end_line,
                            end_col,
                        });
                    }
                    Opening::PureFunction { bracket, binders } => {
                        let (end_line, end_col) = self.bracket_extent(line_number, bracket);
                        let scope = self.tree.create_scope(
                            ScopeKind::Function,
                            Some(parent),
                            line_number,
                            end_line,
                            None,
                        );

                        self.declare_parameters(scope, &binders, line_number);

                        stack.push(OpenScope {
                            id: scope,
                            end_line,
                            end_col,
                        });
                    }
                }
            }
        }
    }

    fn collect_openings(&self, line_number: usize) -> Vec<Opening> {
        let clean = &self.cleaned[line_number - 1];
        let mut openings = Vec::new();

        for caps in FUNCTION_PATTERN.captures_iter(clean) {
            let name_match = caps.get(1).expect("capture group");
            let name = name_match.as_str();
            if is_builtin(name) {
                continue;
            }
            let whole = caps.get(0).expect("capture group");
            openings.push(Opening::Function {
                name_start: name_match.start(),
                name: name.to_string(),
                params: caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default(),
                def_end: whole.end(),
            });
        }

        for caps in SCOPING_PATTERN.captures_iter(clean) {
            let whole = caps.get(0).expect("capture group");
            let kind = match caps.get(1).map(|m| m.as_str()) {
                Some("Module") => ScopeKind::Module,
                Some("Block") => ScopeKind::Block,
                _ => ScopeKind::With,
            };
            let bracket = clean[whole.start()..]
                .find('[')
                .map(|p| whole.start() + p)
                .unwrap_or(whole.start());
            openings.push(Opening::Scoping {
                kind,
                bracket,
                binders: caps.get(2).map(|m| m.as_str().to_string()).unwrap_or_default(),
            });
        }

        for caps in LOOP_PATTERN.captures_iter(clean) {
            let whole = caps.get(0).expect("capture group");
            openings.push(Opening::Loop {
                name: caps
                    .get(1)
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                bracket: whole.end() - 1,
            });
        }

        for caps in PURE_FUNCTION_PATTERN.captures_iter(clean) {
            let whole = caps.get(0).expect("capture group");
            let bracket = clean[whole.start()..]
                .find('[')
                .map(|p| whole.start() + p)
                .unwrap_or(whole.start());
            openings.push(Opening::PureFunction {
                bracket,
                binders: caps
                    .get(1)
                    .or_else(|| caps.get(2))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
            });
        }

        openings.sort_by_key(|o| o.column());
        openings
    }

    /// First iterator specification `{name, ...}` inside a loop's
    /// bracket group. The iterator conventionally follows the body, so
    /// the scan covers every line of the extent.
    fn find_iterator(
        &self,
        start_line: usize,
        bracket: usize,
        end_line: usize,
    ) -> Option<(String, usize, usize)> {
        for line_number in start_line..=end_line.min(self.cleaned.len()) {
            let clean = &self.cleaned[line_number - 1];
            let from = if line_number == start_line { bracket } else { 0 };
            if let Some(name) = ITERATOR_PATTERN
                .captures(&clean[from..])
                .and_then(|c| c.get(1))
            {
                return Some((name.as_str().to_string(), line_number, from + name.start()));
            }
        }
        None
    }

    /// Extent of a function body: the bracket group opened after `:=`,
    /// or just the definition line when the body is inline.
    fn body_extent(&self, line_number: usize, def_end: usize) -> (usize, usize) {
        let clean = &self.cleaned[line_number - 1];
        match clean[def_end..].find('[') {
            Some(p) => self.bracket_extent(line_number, def_end + p),
            None => (line_number, clean.len()),
        }
    }

    /// Finds the line and column of the `]` matching the bracket at
    /// `(start_line, bracket_col)`. Unbalanced input runs to the end of
    /// the file.
    fn bracket_extent(&self, start_line: usize, bracket_col: usize) -> (usize, usize) {
        let mut depth = 0i32;

        for line_number in start_line..=self.cleaned.len() {
            let clean = &self.cleaned[line_number - 1];
            let start = if line_number == start_line { bracket_col } else { 0 };

            for (offset, byte) in clean.as_bytes().iter().enumerate().skip(start) {
                match byte {
                    b'[' => depth += 1,
                    b']' => {
                        depth -= 1;
                        if depth == 0 {
                            return (line_number, offset);
                        }
                    }
                    _ => {}
                }
            }
        }

        let last = self.cleaned.len().max(1);
        (last, self.cleaned.get(last - 1).map(|l| l.len()).unwrap_or(0))
    }

    fn declare_binders(&mut self, scope: ScopeId, binders: &str, line_number: usize) {
        for segment in binders.split(',') {
            let mut name = segment.trim();
            if let Some(eq) = name.find('=') {
                name = name[..eq].trim();
            }
            if let Some(us) = name.find('_') {
                name = name[..us].trim();
            }
            if !name.is_empty() && !is_builtin(name) && IDENT_PATTERN.is_match(name) {
                self.symbols.declare(name, scope, line_number, false, true);
            }
        }
    }

    fn declare_parameters(&mut self, scope: ScopeId, params: &str, line_number: usize) {
        for segment in params.split(',') {
            let mut name = segment.trim();
            if let Some(us) = name.find('_') {
                name = name[..us].trim();
            }
            if !name.is_empty() && !is_builtin(name) && IDENT_PATTERN.is_match(name) {
                self.symbols.declare(name, scope, line_number, true, false);
            }
        }
    }

    /// True when the `=` alternation actually matched an assignment and
    /// not the head of `==`, `===` or `=!=`.
    fn is_assignment_match(clean: &str, op: &str, op_end: usize) -> bool {
        if op == ":=" {
            return true;
        }
        match clean.as_bytes().get(op_end) {
            Some(b'=') | Some(b'!') => false,
            _ => true,
        }
    }

    fn track_assignments(&mut self) {
        for line_number in 1..=self.cleaned.len() {
            let raw = self.file.get_line(line_number).unwrap_or_default();
            if skip_line(raw) {
                continue;
            }

            let clean = self.cleaned[line_number - 1].clone();
            let scope = self
                .tree
                .innermost_at_line(line_number)
                .unwrap_or(self.global);

            for caps in ASSIGNMENT_PATTERN.captures_iter(&clean) {
                let name_match = caps.get(1).expect("capture group");
                let op_match = caps.get(2).expect("capture group");
                let name = name_match.as_str();

                if !Self::is_assignment_match(&clean, op_match.as_str(), op_match.end()) {
                    continue;
                }
                if name_match.start() > 0
                    && clean.as_bytes()[name_match.start() - 1] == b'_'
                {
                    continue;
                }
                if is_builtin(name) {
                    continue;
                }

                let reference = SymbolReference {
                    line: line_number,
                    column: name_match.start(),
                    context: self.context_for(line_number),
                };

                let id = match self.symbols.lookup(&self.tree, scope, name) {
                    Some(id) => id,
                    // Assignment without a declaration creates a global
                    None => self.symbols.declare(name, self.global, line_number, false, false),
                };
                self.symbols.add_assignment(id, reference);
            }
        }
    }

    fn track_reads(&mut self) {
        for line_number in 1..=self.cleaned.len() {
            let raw = self.file.get_line(line_number).unwrap_or_default();
            if skip_line(raw) {
                continue;
            }

            let clean = self.cleaned[line_number - 1].clone();
            let masked = self.masked_spans(&clean);
            let scope = self
                .tree
                .innermost_at_line(line_number)
                .unwrap_or(self.global);

            for ident in IDENT_PATTERN.find_iter(&clean) {
                let name = ident.as_str();
                let start = ident.start();

                if masked.iter().any(|(s, e)| start >= *s && start < *e) {
                    continue;
                }
                if self.declared_sites.contains(&(line_number, start)) {
                    continue;
                }
                if start > 0 && clean.as_bytes()[start - 1] == b'_' {
                    continue;
                }
                if is_builtin(name) {
                    continue;
                }
                if Self::is_assignment_lhs(&clean, ident.end()) {
                    continue;
                }

                let reference = SymbolReference {
                    line: line_number,
                    column: start,
                    context: self.context_for(line_number),
                };

                match self.symbols.lookup(&self.tree, scope, name) {
                    Some(id) => self.symbols.add_read(id, reference),
                    None => self.symbols.add_unresolved(name, scope, reference),
                }
            }
        }
    }

    /// True when the identifier ending at `ident_end` is the left side
    /// of an assignment operator.
    fn is_assignment_lhs(clean: &str, ident_end: usize) -> bool {
        let rest = clean[ident_end..].trim_start();
        if rest.starts_with(":=") {
            return true;
        }
        if let Some(after) = rest.strip_prefix('=') {
            return !matches!(after.as_bytes().first(), Some(b'=') | Some(b'!'));
        }
        false
    }

    /// Byte spans on a line that must not produce reads: function
    /// definition heads and parameter lists, binder names in
    /// Module/Block/With lists, and pure-function parameter names.
    fn masked_spans(&self, clean: &str) -> Vec<(usize, usize)> {
        let mut spans = Vec::new();

        for caps in FUNCTION_PATTERN.captures_iter(clean) {
            if let Some(name) = caps.get(1) {
                spans.push((name.start(), name.end()));
            }
            if let Some(params) = caps.get(2) {
                spans.push((params.start(), params.end()));
            }
        }

        for caps in SCOPING_PATTERN.captures_iter(clean) {
            if let Some(binders) = caps.get(2) {
                Self::mask_binder_names(&mut spans, binders);
            }
        }

        for caps in PURE_FUNCTION_PATTERN.captures_iter(clean) {
            if let Some(binders) = caps.get(1) {
                Self::mask_binder_names(&mut spans, binders);
            }
            if let Some(name) = caps.get(2) {
                spans.push((name.start(), name.end()));
            }
        }

        spans
    }

    fn mask_binder_names(spans: &mut Vec<(usize, usize)>, binders: regex::Match<'_>) {
        let base = binders.start();
        let mut offset = 0;
        for segment in binders.as_str().split(',') {
            if let Some(name) = BINDER_NAME_PATTERN
                .captures(segment)
                .and_then(|c| c.get(1))
            {
                spans.push((base + offset + name.start(), base + offset + name.end()));
            }
            offset += segment.len() + 1;
        }
    }
}

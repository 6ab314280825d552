//! Built-in ASCII-math symbol table.
//!
//! Maps source spellings to TeX. The lexer matches the longest spelling at each
//! position, so `int` wins over `in` and `->` over `-`.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Operators that take arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryKind {
    Frac,
    Root,
    Stackrel,
    Overset,
    Underset,
    Color,
}

/// How a symbol behaves in the grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    /// Emits its TeX as is
    Const,
    /// Opening bracket, TeX is the `\left` delimiter (`.` when invisible)
    LeftBracket,
    /// Closing bracket, TeX is the `\right` delimiter (`.` when invisible)
    RightBracket,
    /// One argument, rendered `\cmd{ x }`
    Command,
    /// One argument wrapped in `\left` / `\right` delimiters
    Fence(&'static str, &'static str),
    /// One raw parenthesised argument rendered as text
    Text,
    Binary(BinaryKind),
    Sub,
    Sup,
    Divide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub tex: &'static str,
    pub kind: SymbolKind,
}

const CONSTANTS: &[(&str, &str)] = &[
    // greek
    ("alpha", "\\alpha"),
    ("beta", "\\beta"),
    ("chi", "\\chi"),
    ("delta", "\\delta"),
    ("Delta", "\\Delta"),
    ("epsi", "\\epsilon"),
    ("epsilon", "\\epsilon"),
    ("varepsilon", "\\varepsilon"),
    ("eta", "\\eta"),
    ("gamma", "\\gamma"),
    ("Gamma", "\\Gamma"),
    ("iota", "\\iota"),
    ("kappa", "\\kappa"),
    ("lambda", "\\lambda"),
    ("Lambda", "\\Lambda"),
    ("lamda", "\\lambda"),
    ("Lamda", "\\Lambda"),
    ("mu", "\\mu"),
    ("nu", "\\nu"),
    ("omega", "\\omega"),
    ("Omega", "\\Omega"),
    ("phi", "\\phi"),
    ("varphi", "\\varphi"),
    ("Phi", "\\Phi"),
    ("pi", "\\pi"),
    ("Pi", "\\Pi"),
    ("psi", "\\psi"),
    ("Psi", "\\Psi"),
    ("rho", "\\rho"),
    ("sigma", "\\sigma"),
    ("Sigma", "\\Sigma"),
    ("tau", "\\tau"),
    ("theta", "\\theta"),
    ("vartheta", "\\vartheta"),
    ("Theta", "\\Theta"),
    ("upsilon", "\\upsilon"),
    ("xi", "\\xi"),
    ("Xi", "\\Xi"),
    ("zeta", "\\zeta"),
    // operators
    ("+", "+"),
    ("-", "-"),
    ("*", "\\cdot"),
    ("**", "\\ast"),
    ("***", "\\star"),
    ("//", "/"),
    ("\\\\", "\\backslash"),
    ("\\", "\\backslash"),
    ("setminus", "\\setminus"),
    ("xx", "\\times"),
    ("|><", "\\ltimes"),
    ("><|", "\\rtimes"),
    ("|><|", "\\bowtie"),
    ("-:", "\\div"),
    ("divide", "\\div"),
    ("@", "\\circ"),
    ("o+", "\\oplus"),
    ("ox", "\\otimes"),
    ("o.", "\\odot"),
    ("sum", "\\sum"),
    ("prod", "\\prod"),
    ("^^", "\\wedge"),
    ("^^^", "\\bigwedge"),
    ("vv", "\\vee"),
    ("vvv", "\\bigvee"),
    ("nn", "\\cap"),
    ("nnn", "\\bigcap"),
    ("uu", "\\cup"),
    ("uuu", "\\bigcup"),
    // relations
    ("=", "="),
    ("!=", "\\ne"),
    (":=", ":="),
    ("lt", "<"),
    ("<", "<"),
    ("gt", ">"),
    (">", ">"),
    ("<=", "\\le"),
    ("lt=", "\\le"),
    (">=", "\\ge"),
    ("gt=", "\\ge"),
    ("-<", "\\prec"),
    ("-<=", "\\preceq"),
    (">-", "\\succ"),
    (">-=", "\\succeq"),
    ("in", "\\in"),
    ("!in", "\\notin"),
    ("sub", "\\subset"),
    ("sup", "\\supset"),
    ("sube", "\\subseteq"),
    ("supe", "\\supseteq"),
    ("-=", "\\equiv"),
    ("~=", "\\cong"),
    ("~~", "\\approx"),
    ("~", "\\sim"),
    ("prop", "\\propto"),
    // logic
    ("and", "\\text{ and }"),
    ("or", "\\text{ or }"),
    ("not", "\\neg"),
    ("=>", "\\implies"),
    ("if", "\\text{ if }"),
    ("<=>", "\\iff"),
    ("AA", "\\forall"),
    ("EE", "\\exists"),
    ("_|_", "\\bot"),
    ("TT", "\\top"),
    ("|--", "\\vdash"),
    ("|==", "\\models"),
    // misc
    ("int", "\\int"),
    ("dx", "{\\text{d}x}"),
    ("dy", "{\\text{d}y}"),
    ("dz", "{\\text{d}z}"),
    ("dt", "{\\text{d}t}"),
    ("oint", "\\oint"),
    ("del", "\\partial"),
    ("grad", "\\nabla"),
    ("+-", "\\pm"),
    ("-+", "\\mp"),
    ("O/", "\\emptyset"),
    ("oo", "\\infty"),
    ("aleph", "\\aleph"),
    ("...", "\\ldots"),
    (":.", "\\therefore"),
    (":'", "\\because"),
    ("/_", "\\angle"),
    ("/_\\", "\\triangle"),
    ("'", "'"),
    ("\\ ", "\\ "),
    ("frown", "\\frown"),
    ("quad", "\\quad"),
    ("qquad", "\\qquad"),
    ("cdots", "\\cdots"),
    ("vdots", "\\vdots"),
    ("ddots", "\\ddots"),
    ("diamond", "\\diamond"),
    ("square", "\\square"),
    ("|__", "\\lfloor"),
    ("__|", "\\rfloor"),
    ("|~", "\\lceil"),
    ("~|", "\\rceil"),
    ("CC", "\\mathbb{C}"),
    ("NN", "\\mathbb{N}"),
    ("QQ", "\\mathbb{Q}"),
    ("RR", "\\mathbb{R}"),
    ("ZZ", "\\mathbb{Z}"),
    ("#", "\\#"),
    ("%", "\\%"),
    ("&", "\\&"),
    ("$", "\\$"),
    ("|", "|"),
    ("||", "\\|"),
    // functions
    ("lim", "\\lim"),
    ("Lim", "\\operatorname{Lim}"),
    ("sin", "\\sin"),
    ("cos", "\\cos"),
    ("tan", "\\tan"),
    ("sec", "\\sec"),
    ("csc", "\\csc"),
    ("cot", "\\cot"),
    ("arcsin", "\\arcsin"),
    ("arccos", "\\arccos"),
    ("arctan", "\\arctan"),
    ("sinh", "\\sinh"),
    ("cosh", "\\cosh"),
    ("tanh", "\\tanh"),
    ("sech", "\\operatorname{sech}"),
    ("csch", "\\operatorname{csch}"),
    ("coth", "\\coth"),
    ("exp", "\\exp"),
    ("log", "\\log"),
    ("ln", "\\ln"),
    ("det", "\\det"),
    ("dim", "\\dim"),
    ("mod", "\\operatorname{mod}"),
    ("gcd", "\\gcd"),
    ("lcm", "\\operatorname{lcm}"),
    ("lub", "\\operatorname{lub}"),
    ("glb", "\\operatorname{glb}"),
    ("min", "\\min"),
    ("max", "\\max"),
    ("inf", "\\inf"),
    // arrows
    ("uarr", "\\uparrow"),
    ("darr", "\\downarrow"),
    ("rarr", "\\rightarrow"),
    ("->", "\\to"),
    (">->", "\\rightarrowtail"),
    ("->>", "\\twoheadrightarrow"),
    (">->>", "\\twoheadrightarrowtail"),
    ("|->", "\\mapsto"),
    ("larr", "\\leftarrow"),
    ("harr", "\\leftrightarrow"),
    ("rArr", "\\Rightarrow"),
    ("lArr", "\\Leftarrow"),
    ("hArr", "\\Leftrightarrow"),
];

const LEFT_BRACKETS: &[(&str, &str)] = &[
    ("(", "("),
    ("[", "["),
    ("{", "\\{"),
    ("(:", "\\langle"),
    ("<<", "\\langle"),
    ("{:", "."),
];

const RIGHT_BRACKETS: &[(&str, &str)] = &[
    (")", ")"),
    ("]", "]"),
    ("}", "\\}"),
    (":)", "\\rangle"),
    (">>", "\\rangle"),
    (":}", "."),
];

const COMMANDS: &[(&str, &str)] = &[
    ("sqrt", "\\sqrt"),
    ("hat", "\\hat"),
    ("bar", "\\overline"),
    ("overline", "\\overline"),
    ("vec", "\\vec"),
    ("dot", "\\dot"),
    ("ddot", "\\ddot"),
    ("tilde", "\\tilde"),
    ("ul", "\\underline"),
    ("underline", "\\underline"),
    ("ubrace", "\\underbrace"),
    ("underbrace", "\\underbrace"),
    ("obrace", "\\overbrace"),
    ("overbrace", "\\overbrace"),
    ("cancel", "\\cancel"),
    ("bb", "\\mathbf"),
    ("mathbf", "\\mathbf"),
    ("bbb", "\\mathbb"),
    ("mathbb", "\\mathbb"),
    ("cc", "\\mathcal"),
    ("mathcal", "\\mathcal"),
    ("tt", "\\mathtt"),
    ("mathtt", "\\mathtt"),
    ("fr", "\\mathfrak"),
    ("mathfrak", "\\mathfrak"),
    ("sf", "\\mathsf"),
    ("mathsf", "\\mathsf"),
    ("rm", "\\mathrm"),
    ("mathrm", "\\mathrm"),
];

const FENCES: &[(&str, &str, &str)] = &[
    ("abs", "|", "|"),
    ("floor", "\\lfloor", "\\rfloor"),
    ("ceil", "\\lceil", "\\rceil"),
    ("norm", "\\|", "\\|"),
];

const BINARIES: &[(&str, &str, BinaryKind)] = &[
    ("frac", "\\frac", BinaryKind::Frac),
    ("root", "\\sqrt", BinaryKind::Root),
    ("stackrel", "\\stackrel", BinaryKind::Stackrel),
    ("overset", "\\overset", BinaryKind::Overset),
    ("underset", "\\underset", BinaryKind::Underset),
    ("color", "\\color", BinaryKind::Color),
];

/// The built-in table, keyed by source spelling.
pub static SYMBOLS: Lazy<HashMap<&'static str, Symbol>> = Lazy::new(|| {
    let mut table = HashMap::new();
    let mut add = |name: &'static str, tex: &'static str, kind: SymbolKind| {
        table.insert(name, Symbol { tex, kind });
    };

    for &(name, tex) in CONSTANTS {
        add(name, tex, SymbolKind::Const);
    }
    for &(name, tex) in LEFT_BRACKETS {
        add(name, tex, SymbolKind::LeftBracket);
    }
    for &(name, tex) in RIGHT_BRACKETS {
        add(name, tex, SymbolKind::RightBracket);
    }
    for &(name, tex) in COMMANDS {
        add(name, tex, SymbolKind::Command);
    }
    for &(name, left, right) in FENCES {
        add(name, "", SymbolKind::Fence(left, right));
    }
    for &(name, tex, kind) in BINARIES {
        add(name, tex, SymbolKind::Binary(kind));
    }
    add("text", "\\text", SymbolKind::Text);
    add("mbox", "\\text", SymbolKind::Text);
    add("_", "\\_", SymbolKind::Sub);
    add("^", "\\hat{}", SymbolKind::Sup);
    add("/", "/", SymbolKind::Divide);

    table
});

/// Length in bytes of the longest built-in spelling.
pub static MAX_SYMBOL_LEN: Lazy<usize> =
    Lazy::new(|| SYMBOLS.keys().map(|name| name.len()).max().unwrap_or(1));

pub fn lookup(name: &str) -> Option<Symbol> {
    SYMBOLS.get(name).copied()
}

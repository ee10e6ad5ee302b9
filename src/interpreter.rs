/// The evaluator module resolves trees against the interpreter state.
///
/// The evaluator walks a parsed tree, pushes and pops values on the operand
/// stack, reads and writes symbols, and invokes directives and builtins. It
/// also dispatches whole lines to the right handler.
///
/// # Responsibilities
/// - Owns the symbol table, the directive table and the operand stack.
/// - Resolves every entity kind, including calls and assignments.
/// - Reports runtime errors such as unknown symbols or stack underflow.
pub mod evaluator;
/// The lexer module classifies the words the parser buffers.
///
/// Words are the runs of characters between operators and parentheses. The
/// lexer decides whether a word is a number, a non-finite magnitude or a
/// name, and turns it into a leaf entity.
pub mod lexer;
/// The parser module builds trees from lines and expressions.
///
/// # Responsibilities
/// - Classifies lines into comments, directives and expressions.
/// - Builds expression trees with correct precedence and associativity.
/// - Reports syntax errors for malformed input.
pub mod parser;
/// The source module feeds multi-line text to the evaluator.
///
/// Joins `\` continuation lines into logical lines and runs whole sources
/// and included files.
pub mod source;

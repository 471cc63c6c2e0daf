fn main() {
    let bindings_dir = std::path::Path::new("bindings").join("c");

    for file in ["tree_sitter_swift.h", "linkage_check.c", "linkage_check.cpp"] {
        println!("cargo:rerun-if-changed={}", bindings_dir.join(file).display());
    }

    // For tree-sitter headers
    let ts_header_dir = std::env::var("DEP_TREE_SITTER_INCLUDE").unwrap_or_default();

    // Strict C99: the header must coexist with tree_sitter/api.h and survive a
    // second include in the same translation unit
    let mut build = cc::Build::new();
    build
        .include(&bindings_dir)
        .file(bindings_dir.join("linkage_check.c"))
        .flag_if_supported("-std=c99")
        .flag_if_supported("-pedantic-errors")
        .warnings(true);
    if !ts_header_dir.is_empty() {
        build.include(&ts_header_dir);
    }
    build.compile("swift_grammar_c_linkage");

    let mut build = cc::Build::new();
    build
        .cpp(true)
        .cpp_link_stdlib(None)
        .include(&bindings_dir)
        .file(bindings_dir.join("linkage_check.cpp"))
        .warnings(true);
    if !ts_header_dir.is_empty() {
        build.include(&ts_header_dir);
    }
    build.compile("swift_grammar_cxx_linkage");
}

//! Selector class declaration generation.

use super::{GENERATOR_BANNER, escape_string_literal};
use crate::analysis::GenerationState;
use treesel_schema::TreeDef;

/// Framework headers every selector includes.
const FRAMEWORK_INCLUDES: [&str; 7] = [
    "TROOT.h",
    "TChain.h",
    "TFile.h",
    "TSelector.h",
    "TTreeReader.h",
    "TTreeReaderValue.h",
    "TTreeReaderArray.h",
];

const RULE: &str = "//////////////////////////////////////////////////////////\n";

/// Generator for the `<Class>.h` artifact.
pub struct DeclarationGenerator<'a> {
    tree: &'a TreeDef,
    state: &'a GenerationState,
}

impl<'a> DeclarationGenerator<'a> {
    /// Creates a new declaration generator.
    #[must_use]
    pub fn new(tree: &'a TreeDef, state: &'a GenerationState) -> Self {
        Self { tree, state }
    }

    /// Generates the declaration artifact.
    #[must_use]
    pub fn generate(&self) -> String {
        let class = self.state.class_name();
        let mut output = String::new();

        output.push_str(&self.generate_banner());

        output.push_str(&format!("#ifndef {class}_h\n"));
        output.push_str(&format!("#define {class}_h\n\n"));

        for header in FRAMEWORK_INCLUDES {
            output.push_str(&format!("#include <{header}>\n"));
        }
        output.push('\n');

        output.push_str("// Headers needed by this particular selector\n");
        for directive in self.state.headers() {
            output.push_str(&directive.text);
            output.push('\n');
        }
        output.push('\n');

        output.push_str(&self.generate_class());
        output.push_str("#endif\n\n");

        output.push_str(&self.generate_inline_methods());

        output
    }

    fn generate_banner(&self) -> String {
        let mut output = String::new();
        let tree = self.tree;

        output.push_str(RULE);
        output.push_str("// This class has been automatically generated\n");
        output.push_str(&format!("// by {GENERATOR_BANNER}\n"));
        if tree.is_chain {
            output.push_str(&format!("// from TChain {}/{}\n", tree.name, tree.title));
        } else {
            output.push_str(&format!("// from TTree {}/{}\n", tree.name, tree.title));
            output.push_str(&format!(
                "// found on file: {}\n",
                tree.source_description()
            ));
        }
        output.push_str(RULE);
        output.push('\n');

        output
    }

    fn generate_class(&self) -> String {
        let class = self.state.class_name();
        let mut output = String::new();

        output.push_str(&format!("class {class} : public TSelector {{\n"));
        output.push_str("public :\n");
        output.push_str("   TTreeReader     fReader;  //!the tree reader\n");
        output.push_str("   TTree          *fChain = 0;   //!pointer to the analyzed TTree or TChain\n\n");

        output.push_str("   // Readers to access the data (delete the ones you do not need).\n");
        for reader in self.state.readers() {
            output.push_str(&format!(
                "   {} {} = {{fReader, \"{}\"}};\n",
                reader.reader_type(),
                reader.accessor_name,
                escape_string_literal(&reader.source_field_name)
            ));
        }

        let diagnostics = self.state.diagnostics();
        if !diagnostics.is_empty() {
            output.push_str("\n   // Branches without a reader:\n");
            for diagnostic in diagnostics {
                output.push_str(&format!("   //    {diagnostic}\n"));
            }
        }
        output.push('\n');

        output.push_str(&format!("   {class}(TTree * /*tree*/ =0) {{ }}\n"));
        output.push_str(&format!("   virtual ~{class}() {{ }}\n"));
        output.push_str("   virtual Int_t   Version() const { return 2; }\n");
        output.push_str("   virtual void    Begin(TTree *tree);\n");
        output.push_str("   virtual void    SlaveBegin(TTree *tree);\n");
        output.push_str("   virtual void    Init(TTree *tree);\n");
        output.push_str("   virtual Bool_t  Notify();\n");
        output.push_str("   virtual Bool_t  Process(Long64_t entry);\n");
        output.push_str(
            "   virtual Int_t   GetEntry(Long64_t entry, Int_t getall = 0) \
             { return fChain ? fChain->GetTree()->GetEntry(entry, getall) : 0; }\n",
        );
        output.push_str("   virtual void    SetOption(const char *option) { fOption = option; }\n");
        output.push_str("   virtual void    SetObject(TObject *obj) { fObject = obj; }\n");
        output.push_str("   virtual void    SetInputList(TList *input) { fInput = input; }\n");
        output.push_str("   virtual TList  *GetOutputList() const { return fOutput; }\n");
        output.push_str("   virtual void    SlaveTerminate();\n");
        output.push_str("   virtual void    Terminate();\n\n");

        output.push_str(&format!("   ClassDef({class},0);\n\n"));
        output.push_str("};\n\n");

        output
    }

    fn generate_inline_methods(&self) -> String {
        let class = self.state.class_name();
        let mut output = String::new();

        output.push_str(&format!("#ifdef {class}_cxx\n"));

        output.push_str(&format!("void {class}::Init(TTree *tree)\n"));
        output.push_str("{\n");
        output.push_str("   // The Init() function is called when the selector needs to initialize\n");
        output.push_str("   // a new tree or chain. Typically here the reader is initialized.\n");
        output.push_str("   // It is normally not necessary to make changes to the generated\n");
        output.push_str("   // code, but the routine can be extended by the user if needed.\n");
        output.push_str("   // Init() will be called many times when running on PROOF\n");
        output.push_str("   // (once per file to be processed).\n\n");
        output.push_str("   fReader.SetTree(tree);\n");
        output.push_str("}\n\n");

        output.push_str(&format!("Bool_t {class}::Notify()\n"));
        output.push_str("{\n");
        output.push_str("   // The Notify() function is called when a new file is opened. This\n");
        output.push_str("   // can be either for a new TTree in a TChain or when when a new TTree\n");
        output.push_str("   // is started when using PROOF. It is normally not necessary to make changes\n");
        output.push_str("   // to the generated code, but the routine can be extended by the\n");
        output.push_str("   // user if needed. The return value is currently not used.\n\n");
        output.push_str("   return kTRUE;\n");
        output.push_str("}\n\n");

        output.push_str(&format!("#endif // #ifdef {class}_cxx\n"));

        output
    }
}

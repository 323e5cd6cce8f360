//! Selector method definition generation.
//!
//! The definition file is the same for every tree apart from the class
//! name: readers are declared in the header and bound on `SetEntry`.

use crate::analysis::GenerationState;

/// Generator for the `<Class>.C` artifact.
pub struct DefinitionGenerator<'a> {
    state: &'a GenerationState,
}

impl<'a> DefinitionGenerator<'a> {
    /// Creates a new definition generator.
    #[must_use]
    pub fn new(state: &'a GenerationState) -> Self {
        Self { state }
    }

    /// Generates the definition artifact.
    #[must_use]
    pub fn generate(&self) -> String {
        let mut output = String::new();

        output.push_str(&self.generate_preamble());
        output.push_str(&self.generate_begin());
        output.push_str(&self.generate_slave_begin());
        output.push_str(&self.generate_process());
        output.push_str(&self.generate_slave_terminate());
        output.push_str(&self.generate_terminate());

        output
    }

    fn generate_preamble(&self) -> String {
        let class = self.state.class_name();
        let mut output = String::new();

        output.push_str(&format!("#define {class}_cxx\n"));
        output.push_str(&format!(
            "// The class definition in {class}.h has been generated automatically.\n"
        ));
        output.push_str("// This class is derived from the ROOT class TSelector.\n\n");
        output.push_str("// The following methods are defined in this file:\n");
        output.push_str("//    Begin():        called every time a loop on the tree starts,\n");
        output.push_str("//                    a convenient place to create your histograms.\n");
        output.push_str("//    SlaveBegin():   called after Begin(), when on PROOF called only on the\n");
        output.push_str("//                    slave servers.\n");
        output.push_str("//    Process():      called for each event, in this function you decide what\n");
        output.push_str("//                    to read and fill your histograms.\n");
        output.push_str("//    SlaveTerminate: called at the end of the loop on the tree, when on PROOF\n");
        output.push_str("//                    called only on the slave servers.\n");
        output.push_str("//    Terminate():    called at the end of the loop on the tree,\n");
        output.push_str("//                    a convenient place to draw/fit your histograms.\n");
        output.push_str("//\n");
        output.push_str("// To use this file, try the following session on your Tree T:\n");
        output.push_str("//\n");
        output.push_str(&format!("// root> T->Process(\"{class}.C\")\n"));
        output.push_str(&format!("// root> T->Process(\"{class}.C\",\"some options\")\n"));
        output.push_str(&format!("// root> T->Process(\"{class}.C+\")\n"));
        output.push_str("//\n\n");

        output.push_str(&format!("#include \"{class}.h\"\n"));
        output.push_str("#include <TH2.h>\n");
        output.push_str("#include <TStyle.h>\n\n");

        output
    }

    fn generate_begin(&self) -> String {
        let class = self.state.class_name();
        let mut output = String::new();

        output.push_str(&format!("void {class}::Begin(TTree * /*tree*/)\n"));
        output.push_str("{\n");
        output.push_str("   // The Begin() function is called at the start of the query.\n");
        output.push_str("   // When running with PROOF Begin() is only called on the client.\n");
        output.push_str("   // The tree argument is deprecated (on PROOF 0 is passed).\n\n");
        output.push_str("   TString option = GetOption();\n");
        output.push_str("}\n\n");

        output
    }

    fn generate_slave_begin(&self) -> String {
        let class = self.state.class_name();
        let mut output = String::new();

        output.push_str(&format!("void {class}::SlaveBegin(TTree * /*tree*/)\n"));
        output.push_str("{\n");
        output.push_str("   // The SlaveBegin() function is called after the Begin() function.\n");
        output.push_str("   // When running with PROOF SlaveBegin() is called on each slave server.\n");
        output.push_str("   // The tree argument is deprecated (on PROOF 0 is passed).\n\n");
        output.push_str("   TString option = GetOption();\n");
        output.push_str("}\n\n");

        output
    }

    fn generate_process(&self) -> String {
        let class = self.state.class_name();
        let mut output = String::new();

        output.push_str(&format!("Bool_t {class}::Process(Long64_t entry)\n"));
        output.push_str("{\n");
        output.push_str("   // The Process() function is called for each entry in the tree (or possibly\n");
        output.push_str("   // keyed object in the case of PROOF) to be processed. The entry argument\n");
        output.push_str("   // specifies which entry in the currently loaded tree is to be processed.\n");
        output.push_str("   // When processing keyed objects with PROOF, the object is already loaded\n");
        output.push_str("   // and is available via the fObject pointer.\n");
        output.push_str("   //\n");
        output.push_str("   // This function should contain the \"body\" of the analysis. It can contain\n");
        output.push_str("   // simple or elaborate selection criteria, run algorithms on the data\n");
        output.push_str("   // of the event and typically fill histograms.\n");
        output.push_str("   //\n");
        output.push_str("   // The processing can be stopped by calling Abort().\n");
        output.push_str("   //\n");
        output.push_str("   // Use fStatus to set the return value of TTree::Process().\n");
        output.push_str("   //\n");
        output.push_str("   // The return value is currently not used.\n\n");
        output.push_str("   fReader.SetEntry(entry);\n\n");
        output.push_str("   return kTRUE;\n");
        output.push_str("}\n\n");

        output
    }

    fn generate_slave_terminate(&self) -> String {
        let class = self.state.class_name();
        let mut output = String::new();

        output.push_str(&format!("void {class}::SlaveTerminate()\n"));
        output.push_str("{\n");
        output.push_str("   // The SlaveTerminate() function is called after all entries or objects\n");
        output.push_str("   // have been processed. When running with PROOF SlaveTerminate() is called\n");
        output.push_str("   // on each slave server.\n");
        output.push_str("}\n\n");

        output
    }

    fn generate_terminate(&self) -> String {
        let class = self.state.class_name();
        let mut output = String::new();

        output.push_str(&format!("void {class}::Terminate()\n"));
        output.push_str("{\n");
        output.push_str("   // The Terminate() function is the last function to be called during\n");
        output.push_str("   // a query. It always runs on the client, it can be used to present\n");
        output.push_str("   // the results graphically or save the results to file.\n");
        output.push_str("}\n");

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treesel_core::{ReaderDescriptor, ReaderKind};

    #[test]
    fn test_includes_declaration() {
        let state = GenerationState::new("EventSel", 3);
        let code = DefinitionGenerator::new(&state).generate();

        assert!(code.starts_with("#define EventSel_cxx\n"));
        assert!(code.contains("#include \"EventSel.h\"\n"));
    }

    #[test]
    fn test_lifecycle_stubs_in_order() {
        let state = GenerationState::new("EventSel", 3);
        let code = DefinitionGenerator::new(&state).generate();

        let positions: Vec<usize> = [
            "void EventSel::Begin(TTree * /*tree*/)",
            "void EventSel::SlaveBegin(TTree * /*tree*/)",
            "Bool_t EventSel::Process(Long64_t entry)",
            "void EventSel::SlaveTerminate()",
            "void EventSel::Terminate()",
        ]
        .iter()
        .map(|signature| code.find(signature).unwrap())
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_process_sets_entry() {
        let state = GenerationState::new("EventSel", 3);
        let code = DefinitionGenerator::new(&state).generate();

        assert_eq!(code.matches("fReader.SetEntry(entry);").count(), 1);
    }

    #[test]
    fn test_independent_of_readers() {
        let empty = GenerationState::new("Sel", 3);
        let mut with_readers = GenerationState::new("Sel", 3);
        with_readers
            .add_reader(ReaderDescriptor::new(ReaderKind::Value, "float", "px", "px"))
            .unwrap();

        assert_eq!(
            DefinitionGenerator::new(&empty).generate(),
            DefinitionGenerator::new(&with_readers).generate()
        );
    }
}

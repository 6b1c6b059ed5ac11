//! Scenario: editing a legacy project
//!
//! Journey: a developer reorganizes a WinForms project whose manifest lists
//! every file.
//!
//! Steps:
//! 1. Open the project and browse it
//! 2. Add a folder and a file, rename the file
//! 3. Rename a form that has designer dependents
//! 4. Delete the new file, move and finally delete folders
//!
//! Success Criteria:
//! - After every step the listing only shows files that exist
//! - Untouched parts of the manifest stay byte-identical

use std::path::Path;
use std::sync::Arc;

use insta::assert_snapshot;
use projsync::{ExplicitManifestProject, LocalFs, PackageReference, Project, ProjectKind};

use crate::common::*;

fn preamble() -> &'static str {
    let end = LEGACY_MANIFEST
        .find("  <ItemGroup>\n    <Compile")
        .unwrap();
    &LEGACY_MANIFEST[..end]
}

#[test]
fn scenario_reorganize_legacy_project() {
    let env = TestEnv::new("Desk.csproj", LEGACY_MANIFEST, LEGACY_FILES);
    env.write("packages.config", PACKAGES_CONFIG);
    let mut project = env.open();

    // Step 1: browse
    assert_eq!(project.kind(), ProjectKind::Explicit);
    assert_eq!(project.name(), "Desk");
    let root = project.files_and_folders(None).unwrap();
    assert_snapshot!(summary(&root), @"Forms/, App.config, Program.cs");

    let forms = project.files_and_folders(Some(Path::new("Forms"))).unwrap();
    assert_snapshot!(summary(&forms), @"Main.cs");
    let dependents: Vec<_> = forms.files[0].dependents.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(dependents, ["Main.Designer.cs", "Main.resx"]);

    let references: Vec<_> = project
        .project_references()
        .unwrap()
        .iter()
        .map(|r| r.name().to_string())
        .collect();
    assert_eq!(references, ["System", "Newtonsoft.Json"]);
    assert_eq!(
        project.package_references().unwrap(),
        [
            PackageReference::new("Newtonsoft.Json", Some("12.0.3".into())),
            PackageReference::new("NUnit", Some("3.13.2".into())),
        ]
    );

    // Step 2: new folder and file
    let models = project.create_folder(&env.path("Models")).unwrap();
    assert!(env.manifest_text().contains("<Folder Include=\"Models\\\" />"));
    let user = project.create_file(&models, "User.cs", None).unwrap();
    let customer = project.rename_file(&user, "Customer.cs").unwrap();
    let text = env.manifest_text();
    assert!(text.contains("<Compile Include=\"Models\\Customer.cs\" />"));
    assert!(!text.contains("<Folder"));
    assert!(text.starts_with(preamble()));
    assert_listing_on_disk(project.as_mut(), None);

    // Step 3: rename a form with dependents
    let shell = project
        .rename_file(&env.path("Forms").join("Main.cs"), "Shell.cs")
        .unwrap();
    assert!(shell.is_file());
    let text = env.manifest_text();
    assert_eq!(text.matches("<DependentUpon>Shell.cs</DependentUpon>").count(), 2);
    let forms = project.files_and_folders(Some(Path::new("Forms"))).unwrap();
    assert_snapshot!(summary(&forms), @"Shell.cs");
    assert_eq!(forms.files[0].dependents.len(), 2);
    assert_listing_on_disk(project.as_mut(), None);

    // Step 4: delete, move, delete
    project.delete_file(&customer).unwrap();
    assert_eq!(
        env.manifest_text().matches("<Folder Include=\"Models\\\" />").count(),
        1
    );

    let moved = project.move_folder(&models, &env.path("Forms")).unwrap();
    assert_eq!(moved, env.path("Forms").join("Models"));
    assert!(env
        .manifest_text()
        .contains("<Folder Include=\"Forms\\Models\\\" />"));
    let forms = project.files_and_folders(Some(Path::new("Forms"))).unwrap();
    assert_snapshot!(summary(&forms), @"Models/, Shell.cs");
    assert_listing_on_disk(project.as_mut(), None);

    project.delete_folder(&env.path("Forms")).unwrap();
    let text = env.manifest_text();
    assert!(!text.contains("Forms"));
    assert!(text.starts_with(preamble()));
    assert!(text.ends_with(
        "  <Import Project=\"$(MSBuildToolsPath)\\Microsoft.CSharp.targets\" />\n</Project>\n"
    ));
    let root = project.files_and_folders(None).unwrap();
    assert_snapshot!(summary(&root), @"App.config, Program.cs");
}

#[test]
fn scenario_shared_items_project() {
    let env = TestEnv::new(
        "Common.projitems",
        "<Project>\n  <ItemGroup>\n    <Compile Include=\"$(MSBuildThisFileDirectory)Text\\Slug.cs\" />\n  </ItemGroup>\n</Project>\n",
        &["Text/Slug.cs"],
    );
    let mut project = env.open();

    assert_eq!(project.kind(), ProjectKind::SharedItems);
    assert!(!project.has_references());
    assert_snapshot!(summary(&project.files_and_folders(None).unwrap()), @"Text/");

    project
        .rename_folder(&env.path("Text"), "Strings")
        .unwrap();
    assert!(env
        .manifest_text()
        .contains("<Compile Include=\"$(MSBuildThisFileDirectory)Strings\\Slug.cs\" />"));
    assert_listing_on_disk(project.as_mut(), None);
}

#[test]
fn scenario_lazy_project_matches_opened_project() {
    let env = TestEnv::new("Desk.csproj", LEGACY_MANIFEST, LEGACY_FILES);
    let mut opened = env.open();
    let mut lazy = ExplicitManifestProject::new(
        &env.manifest,
        LocalFs::new(),
        Arc::new(projsync::Config::default()),
    );

    assert_eq!(
        opened.files_and_folders(None).unwrap(),
        lazy.files_and_folders(None).unwrap()
    );
    assert_eq!(opened.folder_list().unwrap(), lazy.folder_list().unwrap());
}

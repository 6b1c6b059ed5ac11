//! Test fixtures - reusable manifests for tests.

/// A legacy manifest listing every file, with a designer dependent.
pub const LEGACY_MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="15.0" DefaultTargets="Build" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <!-- generated by the IDE, edited by hand -->
  <PropertyGroup>
    <OutputType>WinExe</OutputType>
    <RootNamespace>Desk</RootNamespace>
  </PropertyGroup>
  <ItemGroup>
    <Reference Include="System" />
    <Reference Include="Newtonsoft.Json, Version=12.0.0.0, Culture=neutral, PublicKeyToken=30ad4fe6b2a6aeed" />
  </ItemGroup>
  <ItemGroup>
    <Compile Include="Program.cs" />
    <Compile Include="Forms\Main.cs" />
    <Compile Include="Forms\Main.Designer.cs">
      <DependentUpon>Main.cs</DependentUpon>
    </Compile>
    <EmbeddedResource Include="Forms\Main.resx">
      <DependentUpon>Main.cs</DependentUpon>
    </EmbeddedResource>
    <None Include="App.config" />
  </ItemGroup>
  <Import Project="$(MSBuildToolsPath)\Microsoft.CSharp.targets" />
</Project>
"#;

/// Files on disk for [`LEGACY_MANIFEST`].
pub const LEGACY_FILES: &[&str] = &[
    "Program.cs",
    "Forms/Main.cs",
    "Forms/Main.Designer.cs",
    "Forms/Main.resx",
    "App.config",
];

/// `packages.config` next to the legacy manifest.
pub const PACKAGES_CONFIG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<packages>
  <package version="12.0.3" targetFramework="net472" id="Newtonsoft.Json" />
  <package id="NUnit" version="3.13.2" targetFramework="net472" />
</packages>
"#;

/// A modern manifest with implicit file membership.
pub const SDK_MANIFEST: &str = r#"<Project Sdk="Microsoft.NET.Sdk.Web">
  <PropertyGroup>
    <TargetFramework>net8.0</TargetFramework>
  </PropertyGroup>
  <ItemGroup>
    <PackageReference Include="Serilog.AspNetCore" Version="8.0.0" />
    <PackageReference Include="Dapper">
      <Version>2.1.24</Version>
    </PackageReference>
    <ProjectReference Include="..\Domain\Domain.csproj" />
  </ItemGroup>
</Project>
"#;

/// Files on disk for [`SDK_MANIFEST`].
pub const SDK_FILES: &[&str] = &[
    "Program.cs",
    "Controllers/HomeController.cs",
    "obj/project.assets.json",
    "bin/Debug/Api.dll",
    "Api.csproj.user",
];

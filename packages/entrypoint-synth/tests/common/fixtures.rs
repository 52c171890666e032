//! Scene fixtures

use entrypoint_synth::features::symbol_resolution::{
    ClassRepository, ClassSymbol, MethodSymbol, Scene,
};
use entrypoint_synth::shared::models::JavaType;

use super::builders::ControllerBuilder;

pub const M1: &str = "<C: java.lang.String m1(java.lang.String)>";
pub const M2: &str = "<C: void m2(java.lang.String)>";

pub fn string() -> JavaType {
    JavaType::string()
}

pub fn reference(name: &str) -> JavaType {
    JavaType::reference(name)
}

/// Class `C` with `String m1(String)` and `void m2(String)`
pub fn scenario_scene() -> Scene {
    let mut scene = Scene::with_jdk_stubs();
    let (class, _) = ControllerBuilder::new("C")
        .handler("m1", vec![string()], string())
        .handler("m2", vec![string()], JavaType::Void)
        .build();
    scene.add_class(class);
    scene
}

/// Argument types handlers can draw from
///
/// - `app.Dto(String, int)`
/// - `app.Node(app.Node)`: needs itself
/// - `app.Left(app.Right)` / `app.Right(app.Left)`: need each other
/// - `app.Repo`: interface implemented by `app.MemRepo(app.Dto)`
/// - `app.Hidden`: private constructor only
pub fn install_argument_types(scene: &mut Scene) {
    scene.add_class(
        ClassSymbol::class("app.Dto")
            .with_method(MethodSymbol::constructor(vec![string(), JavaType::Int])),
    );
    scene.add_class(
        ClassSymbol::class("app.Node")
            .with_method(MethodSymbol::constructor(vec![reference("app.Node")])),
    );
    scene.add_class(
        ClassSymbol::class("app.Left")
            .with_method(MethodSymbol::constructor(vec![reference("app.Right")])),
    );
    scene.add_class(
        ClassSymbol::class("app.Right")
            .with_method(MethodSymbol::constructor(vec![reference("app.Left")])),
    );
    scene.add_class(ClassSymbol::interface("app.Repo"));
    scene.add_class(
        ClassSymbol::class("app.MemRepo")
            .implements("app.Repo")
            .with_method(MethodSymbol::constructor(vec![reference("app.Dto")])),
    );
    scene.add_class(
        ClassSymbol::class("app.Hidden")
            .with_method(MethodSymbol::default_constructor().into_private()),
    );
}

pub fn argument_scene() -> Scene {
    let mut scene = Scene::with_jdk_stubs();
    install_argument_types(&mut scene);
    scene
}

//! tsconfig.json for generated packages.

/// The tsconfig.json compiling a generated package.
pub struct TsConfig;

impl TsConfig {
    pub fn render(&self) -> String {
        r#"{
  "compilerOptions": {
    "target": "es5",
    "module": "commonjs",
    "lib": ["esnext"],
    "declaration": true,
    "declarationMap": true,
    "sourceMap": true,
    "diagnostics": true,
    "moduleResolution": "node",
    "esModuleInterop": true,
    "inlineSources": false,
    "strict": true,
    "noImplicitAny": false,
    "typeRoots": ["node_modules/@types"]
  },
  "include": ["**/*.ts"],
  "exclude": ["node_modules", "**/*.d.ts"]
}
"#
        .to_string()
    }
}

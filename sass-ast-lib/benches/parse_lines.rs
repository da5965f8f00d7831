use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sass_ast_lib::{
    ast::Statement,
    config::{Architecture, ParserConfigBuilder},
};

const PROGRAM: &[(u64, &str)] = &[
    (0x0000, "MOV R1, c[0x0][0x28] ;"),
    (0x0010, "S2R R0, SR_TID.X ;"),
    (0x0020, "S2R R3, SR_CTAID.X ;"),
    (0x0030, "IMAD R0, R3, c[0x0][0x0], R0 ;"),
    (0x0040, "ISETP.GE.AND P0, PT, R0, c[0x0][0x170], PT ;"),
    (0x0050, "@P0 EXIT ;"),
    (0x0060, "MOV R5, 0x4 ;"),
    (0x0070, "IMAD.WIDE R2, R0, R5, c[0x0][0x160] ;"),
    (0x0080, "LDG.E.SYS R2, [R2] ;"),
    (0x0090, "FFMA R7, -R2, 0.5, |R2| ;"),
    (0x00a0, "STG.E.SYS [R4.64+0x10], R7 ;"),
    (0x00b0, "EXIT ;"),
    (0x00c0, "BRA 0xc0 ;"),
];

pub fn parse_program(c: &mut Criterion) {
    c.bench_function("parse program", |b| {
        b.iter(|| {
            for (label, text) in PROGRAM {
                let statement = Statement::build(*label, black_box(text));
                black_box(statement).expect("Program not parseable");
            }
        })
    });
}

pub fn parse_program_volta(c: &mut Criterion) {
    let config = ParserConfigBuilder::default()
        .with_architecture(Architecture::Sm70)
        .build()
        .expect("All fields have defaults");
    c.bench_function("parse program (sm_70)", |b| {
        b.iter(|| {
            for (label, text) in PROGRAM {
                let statement = Statement::build_with(&config, *label, black_box(text));
                black_box(statement).expect("Program not parseable");
            }
        })
    });
}

pub fn format_program(c: &mut Criterion) {
    let statements: Vec<_> = PROGRAM
        .iter()
        .map(|(label, text)| Statement::build(*label, text).expect("Program not parseable"))
        .collect();
    c.bench_function("format program", |b| {
        b.iter(|| {
            for statement in &statements {
                black_box(format!("{:#}", statement));
            }
        })
    });
}

criterion_group!(benches, parse_program, parse_program_volta, format_program);
criterion_main!(benches);

//! Built-in category tables

use crate::models::Category;

use super::{CategoryNode, Taxonomy, TypeNode};

const FUNDING_SOURCES: &[&str] = &["Sueldo", "Emprendimiento", "Agora", "Paypal", "Prestamo"];

const FLAT_INCOME_TYPES: &[&str] = &[
    "Sueldo",
    "Emprendimiento",
    "Bono",
    "Negocio",
    "Agora",
    "Paypal",
    "Préstamo",
];

const EDUCATION_DETAILS: &[&str] = &["Matrícula", "Libros", "Mensualidad", "Materiales", "Uniforme"];

fn node(category: Category, types: Vec<TypeNode>) -> CategoryNode {
    CategoryNode { category, types }
}

fn leaf(name: &str) -> TypeNode {
    TypeNode {
        name: name.to_string(),
        details: Vec::new(),
    }
}

fn branch(name: &str, details: &[&str]) -> TypeNode {
    TypeNode {
        name: name.to_string(),
        details: details.iter().map(|d| d.to_string()).collect(),
    }
}

fn leaves(names: &[&str]) -> Vec<TypeNode> {
    names.iter().map(|n| leaf(n)).collect()
}

fn income() -> Vec<CategoryNode> {
    let funded = |names: &[&str]| -> Vec<TypeNode> {
        names.iter().map(|n| branch(n, FUNDING_SOURCES)).collect()
    };

    vec![
        node(
            Category::Housing,
            funded(&[
                "Cuota Banco",
                "Mantenimiento",
                "Luz",
                "Internet",
                "Calidda",
                "Amortización",
            ]),
        ),
        node(Category::Cleaning, leaves(FLAT_INCOME_TYPES)),
        node(Category::Food, leaves(FLAT_INCOME_TYPES)),
        node(
            Category::Services,
            funded(&["Taxi", "Educación", "Medicina", "Cita Médica"]),
        ),
        node(Category::Entertainment, leaves(FLAT_INCOME_TYPES)),
        node(Category::Other, leaves(FLAT_INCOME_TYPES)),
        node(Category::Savings, leaves(FLAT_INCOME_TYPES)),
        node(Category::Support, leaves(FLAT_INCOME_TYPES)),
    ]
}

fn expense() -> Vec<CategoryNode> {
    vec![
        node(
            Category::Housing,
            leaves(&[
                "Cuota Banco",
                "Mantenimiento",
                "Luz",
                "Internet",
                "Calidda",
                "Amortización",
                "Objetos",
            ]),
        ),
        node(
            Category::Cleaning,
            leaves(&[
                "Detergente",
                "Jabón",
                "Aromatizantes",
                "PrestoBarba",
                "Shampoo",
                "Objetos",
            ]),
        ),
        node(
            Category::Food,
            leaves(&[
                "Carne",
                "Pollo",
                "Frutas",
                "Verduras",
                "Lácteos",
                "Especería",
                "Abarrotes",
                "Cereales",
                "Panadería",
                "Menú",
                "Restaurante",
            ]),
        ),
        node(
            Category::Services,
            vec![
                leaf("Taxi"),
                branch("Educación", EDUCATION_DETAILS),
                leaf("Medicina"),
                leaf("Cita Médica"),
            ],
        ),
        node(
            Category::Entertainment,
            vec![
                leaf("Viajes"),
                branch("Suscripciones", &["DisneyPlus", "Netflix", "Paramount"]),
            ],
        ),
        node(
            Category::Other,
            leaves(&["Regalos", "Emergencias", "Bebidas", "Snacks"]),
        ),
        node(Category::Savings, leaves(&["Ahorro General"])),
        node(
            Category::Support,
            vec![
                leaf("Taxi"),
                branch("Educación", EDUCATION_DETAILS),
                leaf("Medicina"),
                leaf("Cita Médica"),
                leaf("Regalos"),
                leaf("Juegos"),
                leaf("Vestimenta"),
                leaf("Dulces"),
                leaf("Pasajes"),
            ],
        ),
    ]
}

/// The household taxonomy shipped with the ledger
pub fn builtin() -> Taxonomy {
    Taxonomy {
        income: income(),
        expense: expense(),
    }
}

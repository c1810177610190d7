//! Seed the database with demo data.
//!
//! Inserts funded demo buyers, two sellers, and a small catalog covering
//! both sized and unsized products. Safe to run more than once: rows carry
//! fixed ids and conflicting inserts are skipped.

use rust_decimal::Decimal;
use secrecy::SecretString;
use sqlx::PgPool;
use tracing::info;

use smartcart_server::db;

struct SeedUser {
    id: i32,
    name: &'static str,
    email: &'static str,
    balance: &'static str,
}

/// Empty `sizes` means unsized stock tracked in `stock_qty`; otherwise
/// `stock_qty` stays zero and each size gets its own row.
struct SeedProduct {
    id: i32,
    seller_id: i32,
    name: &'static str,
    description: &'static str,
    price: &'static str,
    stock_qty: i32,
    sizes: &'static [(&'static str, i32)],
}

const USERS: &[SeedUser] = &[
    SeedUser {
        id: 1,
        name: "Ada Lovelace",
        email: "ada@example.com",
        balance: "100.00",
    },
    SeedUser {
        id: 2,
        name: "Grace Hopper",
        email: "grace@example.com",
        balance: "0.00",
    },
    SeedUser {
        id: 3,
        name: "Alan Turing",
        email: "alan@example.com",
        balance: "0.00",
    },
    // Funded buyers with no other role, so overlapping checkouts can run
    // against principals nobody else touches.
    SeedUser {
        id: 4,
        name: "Barbara Liskov",
        email: "barbara@example.com",
        balance: "50.00",
    },
    SeedUser {
        id: 5,
        name: "Edsger Dijkstra",
        email: "edsger@example.com",
        balance: "50.00",
    },
];

const PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        id: 1,
        seller_id: 2,
        name: "Classic Logo Tee",
        description: "Soft cotton tee with the SmartCart logo.",
        price: "30.00",
        stock_qty: 0,
        sizes: &[("S", 5), ("M", 5), ("L", 5), ("XL", 0)],
    },
    SeedProduct {
        id: 2,
        seller_id: 3,
        name: "Enamel Camp Mug",
        description: "12 oz enamel mug, campfire approved.",
        price: "10.00",
        stock_qty: 25,
        sizes: &[],
    },
    SeedProduct {
        id: 3,
        seller_id: 2,
        name: "Canvas Tote",
        description: "Heavyweight canvas tote for groceries or gear.",
        price: "19.99",
        stock_qty: 40,
        sizes: &[],
    },
    // Deliberately scarce, for exercising out-of-stock rejections.
    SeedProduct {
        id: 4,
        seller_id: 3,
        name: "Sticker Pack",
        description: "Last few holographic sticker packs.",
        price: "2.50",
        stock_qty: 3,
        sizes: &[],
    },
];

/// Seed demo users and products.
///
/// # Errors
///
/// Returns an error if environment variables are missing or database
/// operations fail.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let database_url = std::env::var("SMARTCART_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "SMARTCART_DATABASE_URL not set")?;

    let pool = db::create_pool(&database_url).await?;
    info!("Connected to database");

    seed_users(&pool).await?;
    seed_products(&pool).await?;

    info!("Seeding complete!");
    Ok(())
}

async fn seed_users(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    for user in USERS {
        let balance: Decimal = user.balance.parse()?;
        sqlx::query(
            r"
            INSERT INTO users (user_id, name, email, balance)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO NOTHING
            ",
        )
        .bind(user.id)
        .bind(user.name)
        .bind(user.email)
        .bind(balance)
        .execute(pool)
        .await?;
    }

    // Explicit ids bypass the sequence; move it past them.
    sqlx::query(
        "SELECT setval(pg_get_serial_sequence('users', 'user_id'), (SELECT MAX(user_id) FROM users))",
    )
    .execute(pool)
    .await?;

    info!(count = USERS.len(), "Users seeded");
    Ok(())
}

async fn seed_products(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
    for product in PRODUCTS {
        let price: Decimal = product.price.parse()?;
        sqlx::query(
            r"
            INSERT INTO products (product_id, seller_id, name, description, price, stock_qty)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (product_id) DO NOTHING
            ",
        )
        .bind(product.id)
        .bind(product.seller_id)
        .bind(product.name)
        .bind(product.description)
        .bind(price)
        .bind(product.stock_qty)
        .execute(pool)
        .await?;

        for &(size, stock) in product.sizes {
            sqlx::query(
                r"
                INSERT INTO product_sizes (product_id, size, stock)
                VALUES ($1, $2, $3)
                ON CONFLICT (product_id, size) DO NOTHING
                ",
            )
            .bind(product.id)
            .bind(size)
            .bind(stock)
            .execute(pool)
            .await?;
        }
    }

    sqlx::query(
        "SELECT setval(pg_get_serial_sequence('products', 'product_id'), (SELECT MAX(product_id) FROM products))",
    )
    .execute(pool)
    .await?;

    info!(count = PRODUCTS.len(), "Products seeded");
    Ok(())
}

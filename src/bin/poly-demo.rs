//! Builds a few sample polynomials and prints a sum, a product and a
//! derivative computed from them.

use mimalloc::MiMalloc;
use polynomial_arith::polynomial::Polynomial;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

type IntPoly = Polynomial<i64>;

fn main() {
    let mut p1 = IntPoly::new();
    p1.insert_term(3, 4);
    p1.insert_term(2, 2);
    p1.insert_term(-1, 1);
    p1.insert_term(5, 0);

    let mut p2 = IntPoly::new();
    p2.insert_term(1, 4);
    p2.insert_term(1, 0);

    let mut p3 = IntPoly::new();
    p3.insert_term(2, 1);

    let sum = &p1 + &p2;
    let prod = &sum * &p3;
    let deriv = p1.derivative();

    println!("p1 = {}", p1);
    println!("sum = {}", sum);
    println!("prod = {}", prod);
    println!("deriv = {}", deriv);
}

//! Tests scientifiques (campagne) : scénarios concrets + robustesse + limites contrôlées.
//!
//! But : vérifier les lois du noyau sur des cas écrits à la main,
//! puis trouver les limites sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (nombre de facteurs, taille des exposants)

use std::time::{Duration, Instant};

use num_bigint::BigInt;
use num_rational::BigRational;

use super::{asterms, composition, expression_factory, reduce, standard, Expression};

fn expr_ok(s: &str) -> Expression {
    expression_factory(s).unwrap_or_else(|e| panic!("expr={s:?} err={e}"))
}

fn q(n: i64, d: i64) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

/// Contenu attendu, indépendant de l’ordre.
fn assert_contenu(e: &Expression, attendu: &[(&str, i64, i64)]) {
    assert_eq!(e.len(), attendu.len(), "e={e} attendu={attendu:?}");
    for (b, n, d) in attendu {
        assert_eq!(e.exponent_of(b), Some(&q(*n, *d)), "base {b} dans {e}");
    }
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Scénarios concrets ------------------------ */

#[test]
fn sci_km_j_erg() {
    let e = expr_ok("km^2 * J / erg");
    assert_contenu(&e, &[("km", 2, 1), ("J", 1, 1), ("erg", -1, 1)]);
}

#[test]
fn sci_vitesse_deux_chemins() {
    let a = expr_ok("m") * expr_ok("1/s");
    let b = expr_ok("m / s");
    assert_contenu(&a, &[("m", 1, 1), ("s", -1, 1)]);
    assert_eq!(a, b);
}

#[test]
fn sci_m_sur_m_neutre() {
    let e = expr_ok("m") / expr_ok("m");
    assert!(e.is_identity());
    assert_eq!(e.to_string(), "1");
}

#[test]
fn sci_racine_de_m2() {
    let e = expr_ok("m^2").try_pow(0.5).unwrap();
    assert_contenu(&e, &[("m", 1, 1)]);
    assert_eq!(e.to_string(), "m");
}

#[test]
fn sci_annulation() {
    let e = expr_ok("a * a^-1 * b");
    assert_contenu(&e, &[("b", 1, 1)]);
}

#[test]
fn sci_erreurs_de_lecture() {
    for s in ["", "* m", "m *", "m // s", "m^", "m s", "(m)"] {
        let err = expression_factory(s).unwrap_err();
        assert!(err.is_parsing_error(), "s={s:?} err={err:?}");
    }
}

/* ------------------------ Lois algébriques (cas écrits) ------------------------ */

#[test]
fn sci_neutre_des_deux_cotes() {
    let un = expr_ok("1");
    for s in ["m", "km^2 * J / erg", "1/s", "m^1/2"] {
        let e = expr_ok(s);
        assert_eq!(&un * &e, e, "1 * {s}");
        assert_eq!(&e * &un, e, "{s} * 1");
    }
}

#[test]
fn sci_aller_retour_texte() {
    for s in [
        "km^2 * J / erg",
        "1 / s",
        "m^1/2 / s^3/2",
        "kg * m^2 / s^2 / K",
        "x^-2/3 * y^0.25",
    ] {
        let e = expr_ok(s);
        let texte = e.to_string();
        assert_eq!(expr_ok(&texte), e, "s={s:?} texte={texte:?}");
        assert_eq!(standard(&texte).unwrap(), texte, "standard stable");
    }
}

#[test]
fn sci_reduce_idempotent_sur_texte() {
    let brut = asterms("a / b * a^2 / c * b^3 / a").unwrap();
    let une = reduce(brut);
    assert_eq!(reduce(une.clone()), une);
}

#[test]
fn sci_composition_n_est_pas_un_garde_fou() {
    // "a" n’est pas une composition… mais reste une expression valide
    assert!(!composition(&"a".into()));
    assert!(expression_factory("a").is_ok());
    // et l’heuristique ne valide pas le texte
    assert!(composition(&"* *".into()));
    assert!(expression_factory("* *").is_err());
}

#[test]
fn sci_partage_entre_threads() {
    fn envoyable<T: Send + Sync>() {}
    envoyable::<Expression>();

    let e = expr_ok("m / s");
    let handles: Vec<_> = (0..4)
        .map(|k| {
            let e = e.clone();
            std::thread::spawn(move || e.try_pow(k).unwrap().to_string())
        })
        .collect();
    let rendus: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(rendus, vec!["1", "m / s", "m^2 / s^2", "m^3 / s^3"]);
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_produit_long_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // 2000 facteurs sur 20 bases : réduction en 20 termes au plus
    let mut s = String::new();
    for k in 0..2000 {
        if k > 0 {
            s.push_str(if k % 3 == 0 { " / " } else { " * " });
        }
        s.push_str(&format!("b{}", k % 20));
        budget(t0, max);
    }

    let e = expr_ok(&s);
    assert!(e.len() <= 20);
    assert_eq!(expr_ok(&e.to_string()), e);
    budget(t0, max);
}

#[test]
fn sci_stress_exposants_bigint_safe() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    // exposant à 60 chiffres : reste exact
    let big = "9".repeat(60);
    let e = expr_ok(&format!("m^{big}/7 * m^1/7"));
    budget(t0, max);

    let attendu = BigRational::new(
        BigInt::parse_bytes(big.as_bytes(), 10).unwrap() + 1,
        BigInt::from(7),
    );
    assert_eq!(e.exponent_of("m"), Some(&attendu));
}

#![allow(dead_code)]

use beanstalk::{Bean, BeanDefinition, Container, Entry, HookErrorKind, Inject, InstantiateErrorKind};
use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

struct A(Arc<B>, Arc<C>);
struct B(i32);
struct C(Arc<CA>);
struct CA(Arc<CAA>);
struct CAA(Arc<CAAA>);
struct CAAA;

impl Bean for A {}
impl Bean for B {}
impl Bean for C {}
impl Bean for CA {}
impl Bean for CAA {}
impl Bean for CAAA {}

fn definitions(prototype: bool) -> Vec<BeanDefinition> {
    let definitions = [
        BeanDefinition::from_factory(|| Ok::<_, InstantiateErrorKind>(CAAA), []).id("caaa"),
        BeanDefinition::from_factory(
            |Inject(caaa): Inject<CAAA>| Ok::<_, InstantiateErrorKind>(CAA(caaa)),
            [Entry::reference("caaa")],
        )
        .id("caa"),
        BeanDefinition::from_factory(
            |Inject(caa): Inject<CAA>| Ok::<_, InstantiateErrorKind>(CA(caa)),
            [Entry::reference("caa")],
        )
        .id("ca"),
        BeanDefinition::from_factory(|Inject(ca): Inject<CA>| Ok::<_, InstantiateErrorKind>(C(ca)), [Entry::reference("ca")]).id("c"),
        BeanDefinition::from_factory(|| Ok::<_, InstantiateErrorKind>(B(2)), []).id("b"),
        BeanDefinition::from_factory(
            |Inject(b): Inject<B>, Inject(c): Inject<C>| Ok::<_, InstantiateErrorKind>(A(b, c)),
            [Entry::reference("b"), Entry::reference("c")],
        )
        .id("a")
        .finalizer(|_: Arc<A>| Ok::<_, HookErrorKind>(())),
    ];

    definitions
        .into_iter()
        .map(|definition| if prototype && definition.get_id() != Some("a") { definition.prototype() } else { definition })
        .collect()
}

#[inline]
fn container_get(container: &Container) {
    let _ = container.get::<A>("a").unwrap();
}

#[inline]
fn container_finalize(container: &Container) {
    let _ = container.get::<A>("a").unwrap();

    container.finalize().unwrap();
}

fn criterion_benchmark(c: &mut Criterion) {
    let cached = Container::build(definitions(false)).unwrap();

    c.bench_function("container_build", |b| b.iter(|| Container::build(definitions(false)).unwrap()))
        .bench_function("container_get", |b| {
            b.iter(|| container_get(&Container::build(definitions(false)).unwrap()))
        })
        .bench_function("container_get_with_cache", |b| b.iter(|| container_get(&cached)))
        .bench_function("container_get_prototypes", |b| {
            b.iter(|| container_get(&Container::build(definitions(true)).unwrap()))
        })
        .bench_function("container_finalize", |b| {
            b.iter(|| container_finalize(&Container::build(definitions(false)).unwrap()))
        });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
